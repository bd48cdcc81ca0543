//! Field validation for write payloads.
//!
//! Validation runs in the route handlers before anything touches the
//! database. All problems with a payload are collected and returned together
//! as one 400 response, so a form with a short VIN and a bad year reports
//! both at once.

use crate::errors::ApiError;
use crate::models::car::{CarCreate, CarUpdate};
use crate::models::customer::{CustomerCreate, CustomerUpdate};
use crate::models::part::{PartCreate, PartUpdate};
use crate::models::sale::{SaleCreate, SaleUpdate};
use crate::models::supplier::{SupplierCreate, SupplierUpdate};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;

pub const VIN_LENGTH: usize = 17;
pub const MIN_YEAR: i32 = 1900;

/// Latest accepted model year. Next year's models reach the market before
/// the calendar turns, so the bound is one year ahead.
#[must_use]
pub fn max_year() -> i32 {
    Utc::now().year() + 1
}

fn check_vin(vin: &str, errors: &mut Vec<String>) {
    if vin.trim().chars().count() != VIN_LENGTH {
        errors.push(format!("vin must be exactly {VIN_LENGTH} characters"));
    }
}

fn check_year(year: i32, errors: &mut Vec<String>) {
    if year < MIN_YEAR {
        errors.push(format!("year must be {MIN_YEAR} or later"));
    } else if year > max_year() {
        errors.push(format!("year must not exceed {}", max_year()));
    }
}

fn check_not_blank(field: &str, value: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("{field} must not be empty"));
    }
}

fn check_not_negative_decimal(field: &str, value: Decimal, errors: &mut Vec<String>) {
    if value < Decimal::ZERO {
        errors.push(format!("{field} must not be negative"));
    }
}

fn check_not_negative_int(field: &str, value: i32, errors: &mut Vec<String>) {
    if value < 0 {
        errors.push(format!("{field} must not be negative"));
    }
}

fn finish(errors: Vec<String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_failed(errors))
    }
}

pub fn validate_car_create(payload: &CarCreate) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    check_not_blank("brand", &payload.brand, &mut errors);
    check_not_blank("model", &payload.model, &mut errors);
    check_year(payload.year, &mut errors);
    check_vin(&payload.vin, &mut errors);
    if let Some(mileage) = payload.mileage {
        check_not_negative_int("mileage", mileage, &mut errors);
    }
    if let Some(volume) = payload.engine_volume {
        check_not_negative_decimal("engineVolume", volume, &mut errors);
    }
    finish(errors)
}

pub fn validate_car_update(payload: &CarUpdate) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if let Some(brand) = payload.brand.as_deref() {
        check_not_blank("brand", brand, &mut errors);
    }
    if let Some(model) = payload.model.as_deref() {
        check_not_blank("model", model, &mut errors);
    }
    if let Some(year) = payload.year {
        check_year(year, &mut errors);
    }
    if let Some(vin) = payload.vin.as_deref() {
        check_vin(vin, &mut errors);
    }
    if let Some(Some(mileage)) = payload.mileage {
        check_not_negative_int("mileage", mileage, &mut errors);
    }
    if let Some(Some(volume)) = payload.engine_volume {
        check_not_negative_decimal("engineVolume", volume, &mut errors);
    }
    finish(errors)
}

pub fn validate_part_create(payload: &PartCreate) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    check_not_blank("name", &payload.name, &mut errors);
    if let Some(price) = payload.price {
        check_not_negative_decimal("price", price, &mut errors);
    }
    if let Some(price) = payload.purchase_price {
        check_not_negative_decimal("purchasePrice", price, &mut errors);
    }
    finish(errors)
}

pub fn validate_part_update(payload: &PartUpdate) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if let Some(name) = payload.name.as_deref() {
        check_not_blank("name", name, &mut errors);
    }
    if let Some(Some(price)) = payload.price {
        check_not_negative_decimal("price", price, &mut errors);
    }
    if let Some(Some(price)) = payload.purchase_price {
        check_not_negative_decimal("purchasePrice", price, &mut errors);
    }
    finish(errors)
}

pub fn validate_supplier_create(payload: &SupplierCreate) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    check_not_blank("name", &payload.name, &mut errors);
    finish(errors)
}

pub fn validate_supplier_update(payload: &SupplierUpdate) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if let Some(name) = payload.name.as_deref() {
        check_not_blank("name", name, &mut errors);
    }
    finish(errors)
}

pub fn validate_customer_create(payload: &CustomerCreate) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    check_not_blank("name", &payload.name, &mut errors);
    finish(errors)
}

pub fn validate_customer_update(payload: &CustomerUpdate) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if let Some(name) = payload.name.as_deref() {
        check_not_blank("name", name, &mut errors);
    }
    finish(errors)
}

pub fn validate_sale_create(payload: &SaleCreate) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    check_not_negative_decimal("price", payload.price, &mut errors);
    finish(errors)
}

pub fn validate_sale_update(payload: &SaleUpdate) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if let Some(price) = payload.price {
        check_not_negative_decimal("price", price, &mut errors);
    }
    finish(errors)
}
