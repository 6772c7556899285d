use crate::db::Data;
use crate::errors::AppError;
use crate::models::{next_id, CarWash, CarWashInput, WashBay, WashBayInput};
use crate::services::availability::BAY_NOT_FOUND;

pub const CARWASH_NOT_FOUND: &str = "Мойка не найдена";
pub const CARWASH_HAS_BAYS: &str = "Нельзя удалить мойку с привязанными местами";
pub const BAY_HAS_APPOINTMENTS: &str = "Нельзя удалить место с привязанными записями";

pub fn create_carwash(data: &mut Data, input: CarWashInput) -> CarWash {
    let carwash = CarWash {
        id: next_id(&data.carwashes),
        name: input.name.unwrap_or_default(),
        address: input.address.unwrap_or_default(),
        is_active: input.is_active.unwrap_or(true),
    };
    data.carwashes.push(carwash.clone());
    carwash
}

pub fn update_carwash(data: &mut Data, id: i64, input: CarWashInput) -> Result<CarWash, AppError> {
    let carwash = data
        .carwashes
        .iter_mut()
        .find(|cw| cw.id == id)
        .ok_or_else(|| AppError::NotFound(CARWASH_NOT_FOUND.to_string()))?;

    if let Some(name) = input.name {
        carwash.name = name;
    }
    if let Some(address) = input.address {
        carwash.address = address;
    }
    if let Some(is_active) = input.is_active {
        carwash.is_active = is_active;
    }
    Ok(carwash.clone())
}

/// Refused while any bay still belongs to the location.
pub fn delete_carwash(data: &mut Data, id: i64) -> Result<(), AppError> {
    if data.washbays.iter().any(|bay| bay.car_wash_id == Some(id)) {
        return Err(AppError::Conflict(CARWASH_HAS_BAYS.to_string()));
    }

    let before = data.carwashes.len();
    data.carwashes.retain(|cw| cw.id != id);
    if data.carwashes.len() == before {
        return Err(AppError::NotFound(CARWASH_NOT_FOUND.to_string()));
    }
    tracing::info!(id, "carwash deleted");
    Ok(())
}

pub fn create_washbay(data: &mut Data, input: WashBayInput) -> WashBay {
    let bay = WashBay {
        id: next_id(&data.washbays),
        car_wash_id: input.car_wash_id,
        name: input.name.unwrap_or_default(),
        description: input.description.unwrap_or_default(),
        is_active: input.is_active.unwrap_or(true),
    };
    data.washbays.push(bay.clone());
    bay
}

pub fn update_washbay(data: &mut Data, id: i64, input: WashBayInput) -> Result<WashBay, AppError> {
    let bay = data
        .washbays
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| AppError::NotFound(BAY_NOT_FOUND.to_string()))?;

    if let Some(car_wash_id) = input.car_wash_id {
        bay.car_wash_id = Some(car_wash_id);
    }
    if let Some(name) = input.name {
        bay.name = name;
    }
    if let Some(description) = input.description {
        bay.description = description;
    }
    if let Some(is_active) = input.is_active {
        bay.is_active = is_active;
    }
    Ok(bay.clone())
}

/// Refused while any appointment, in any status, references the bay.
pub fn delete_washbay(data: &mut Data, id: i64) -> Result<(), AppError> {
    if data.appointments.iter().any(|a| a.wash_bay_id == Some(id)) {
        return Err(AppError::Conflict(BAY_HAS_APPOINTMENTS.to_string()));
    }

    let before = data.washbays.len();
    data.washbays.retain(|b| b.id != id);
    if data.washbays.len() == before {
        return Err(AppError::NotFound(BAY_NOT_FOUND.to_string()));
    }
    tracing::info!(id, "wash bay deleted");
    Ok(())
}
