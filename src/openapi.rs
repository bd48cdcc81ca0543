//! OpenAPI document served at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "partstock",
        description = "Inventory API for a used auto parts yard: donor cars, harvested parts, suppliers, customers and sales."
    ),
    tags(
        (name = "cars", description = "Donor car management"),
        (name = "parts", description = "Part management and name suggestions"),
        (name = "suppliers", description = "Supplier directory"),
        (name = "customers", description = "Customer directory"),
        (name = "sales", description = "Sales and cancellations"),
        (name = "uploads", description = "Image uploads"),
        (name = "dashboard", description = "Aggregated statistics")
    )
)]
pub struct ApiDoc;
