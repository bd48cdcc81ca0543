//! Sorting for list endpoints.
//!
//! Clients pass `?sort=<camelCase key>&order=asc|desc`. Keys are matched
//! against the resource's sortable column table; unknown keys fall back to the
//! resource default instead of failing the request.

use sea_orm::{ColumnTrait, Order};

/// Resolve `?sort=`/`?order=` into a concrete column and direction.
///
/// An explicit `sort` without an `order` sorts ascending. With neither
/// parameter present the resource default applies (typically newest first).
pub fn resolve<C: ColumnTrait + Copy>(
    sort: Option<&str>,
    order: Option<&str>,
    columns: &[(&'static str, C)],
    default: (C, Order),
) -> (C, Order) {
    let column = sort
        .and_then(|name| columns.iter().find(|(candidate, _)| *candidate == name))
        .map(|(_, column)| *column);

    let direction = match order {
        Some(raw) if raw.eq_ignore_ascii_case("desc") => Order::Desc,
        Some(_) => Order::Asc,
        None if column.is_some() => Order::Asc,
        None => default.1,
    };

    (column.unwrap_or(default.0), direction)
}
