//! Business logic for master data: validation and not-found handling on top of a store.

use crate::{
    Error,
    master_data::{
        MasterData, MasterDataId, MasterDataInput, MasterDataStore, validate_master_data_input,
    },
};

/// Get all master data items, newest first.
pub fn get_all_master_data(store: &impl MasterDataStore) -> Result<Vec<MasterData>, Error> {
    store.get_all()
}

/// Get a single master data item.
///
/// # Errors
/// Returns [Error::MasterDataNotFound] if no item has `id`.
pub fn get_master_data_by_id(
    id: MasterDataId,
    store: &impl MasterDataStore,
) -> Result<MasterData, Error> {
    store.find_by_id(id)?.ok_or(Error::MasterDataNotFound)
}

/// Validate `input` and create a master data item from it.
///
/// # Errors
/// Returns [Error::EmptyTitle] if the title is missing or empty.
pub fn create_master_data(
    input: MasterDataInput,
    store: &impl MasterDataStore,
) -> Result<MasterData, Error> {
    let title = validate_master_data_input(&input)?;

    store.create(title)
}

/// Validate `input` and replace the title of the item with `id`.
///
/// # Errors
/// Returns [Error::EmptyTitle] if the title is missing or empty, or
/// [Error::MasterDataNotFound] if no item has `id`.
pub fn update_master_data(
    id: MasterDataId,
    input: MasterDataInput,
    store: &impl MasterDataStore,
) -> Result<MasterData, Error> {
    let title = validate_master_data_input(&input)?;

    store.update(id, title)?.ok_or(Error::MasterDataNotFound)
}

/// Delete the item with `id`.
///
/// Expenses that reference the item keep the dangling reference.
///
/// # Errors
/// Returns [Error::MasterDataNotFound] if no item has `id`.
pub fn delete_master_data(id: MasterDataId, store: &impl MasterDataStore) -> Result<(), Error> {
    if store.delete(id)? {
        Ok(())
    } else {
        Err(Error::MasterDataNotFound)
    }
}
