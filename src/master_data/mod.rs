//! Master data: the user-defined list of expense types.

mod domain;
mod endpoints;
mod service;
mod store;

pub use domain::{MasterData, MasterDataId, MasterDataInput, Title, validate_master_data_input};
pub use endpoints::{
    create_master_data_endpoint, delete_master_data_endpoint, get_all_master_data_endpoint,
    get_master_data_endpoint, update_master_data_endpoint,
};
pub use service::{
    create_master_data, delete_master_data, get_all_master_data, get_master_data_by_id,
    update_master_data,
};
pub use store::{MasterDataStore, SQLiteMasterDataStore, create_master_data_table};
