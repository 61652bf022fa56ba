//! Route handlers for the master data (expense type) API.

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::{HeaderName, StatusCode, header},
};

use crate::{
    AppState, Error,
    database_id::validate_record_id,
    endpoints::{self, format_endpoint},
    extract::JsonBody,
    master_data::{
        MasterData, MasterDataInput, SQLiteMasterDataStore, create_master_data,
        delete_master_data, get_all_master_data, get_master_data_by_id, update_master_data,
    },
};

/// The state needed for the master data endpoints.
#[derive(Debug, Clone)]
pub struct MasterDataEndpointState {
    /// The store for master data items.
    pub store: SQLiteMasterDataStore,
}

impl FromRef<AppState> for MasterDataEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: SQLiteMasterDataStore::new(state.database.clone()),
        }
    }
}

/// List all master data items.
pub async fn get_all_master_data_endpoint(
    State(state): State<MasterDataEndpointState>,
) -> Result<Json<Vec<MasterData>>, Error> {
    get_all_master_data(&state.store).map(Json)
}

/// Get one master data item by ID.
pub async fn get_master_data_endpoint(
    Path(raw_id): Path<String>,
    State(state): State<MasterDataEndpointState>,
) -> Result<Json<MasterData>, Error> {
    let id = validate_record_id(&raw_id)?;

    get_master_data_by_id(id, &state.store).map(Json)
}

/// Create a master data item, responding with 201, the new item and its location.
pub async fn create_master_data_endpoint(
    State(state): State<MasterDataEndpointState>,
    JsonBody(input): JsonBody<MasterDataInput>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<MasterData>), Error> {
    let item = create_master_data(input, &state.store)?;
    tracing::debug!("Created master data item {}", item.id);

    let location = format_endpoint(endpoints::MASTER_DATA_ITEM, item.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}

/// Replace the title of a master data item.
///
/// Serves both PATCH and PUT.
pub async fn update_master_data_endpoint(
    Path(raw_id): Path<String>,
    State(state): State<MasterDataEndpointState>,
    JsonBody(input): JsonBody<MasterDataInput>,
) -> Result<Json<MasterData>, Error> {
    let id = validate_record_id(&raw_id)?;

    update_master_data(id, input, &state.store).map(Json)
}

/// Delete a master data item, responding with 204 and no body.
pub async fn delete_master_data_endpoint(
    Path(raw_id): Path<String>,
    State(state): State<MasterDataEndpointState>,
) -> Result<StatusCode, Error> {
    let id = validate_record_id(&raw_id)?;

    delete_master_data(id, &state.store)?;
    tracing::debug!("Deleted master data item {id}");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod master_data_endpoint_tests {
    use axum::{
        extract::{Path, State},
        http::{StatusCode, header},
    };
    use serde_json::{Value, json};

    use crate::{
        Error,
        db::Database,
        endpoints::{self, format_endpoint},
        extract::JsonBody,
        master_data::{
            MasterData, MasterDataInput, MasterDataStore, SQLiteMasterDataStore, Title,
            endpoints::{MasterDataEndpointState, update_master_data_endpoint},
        },
        test_utils::{get_test_server, get_test_server_with_database},
    };

    #[tokio::test]
    async fn create_responds_with_created_item() {
        let server = get_test_server();

        let response = server
            .post(endpoints::MASTER_DATA)
            .json(&json!({"title": "Food"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let item = response.json::<MasterData>();
        assert!(item.id > 0);
        assert_eq!(
            response.header(header::LOCATION),
            format_endpoint(endpoints::MASTER_DATA_ITEM, item.id)
        );
        assert_eq!(item.title, Title::new_unchecked("Food"));
    }

    #[tokio::test]
    async fn create_without_title_is_bad_request() {
        let server = get_test_server();

        let response = server.post(endpoints::MASTER_DATA).json(&json!({})).await;

        response.assert_status_bad_request();
        response.assert_json(&json!({"error": "Title is required"}));
    }

    #[tokio::test]
    async fn create_with_malformed_json_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::MASTER_DATA)
            .text("{\"title\": ")
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn list_returns_created_items() {
        let server = get_test_server();
        for title in ["Food", "Rent"] {
            server
                .post(endpoints::MASTER_DATA)
                .json(&json!({"title": title}))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server.get(endpoints::MASTER_DATA).await;

        response.assert_status_ok();
        let titles: Vec<String> = response
            .json::<Vec<MasterData>>()
            .into_iter()
            .map(|item| item.title.to_string())
            .collect();
        assert_eq!(titles.len(), 2);
        assert!(titles.contains(&"Food".to_owned()));
        assert!(titles.contains(&"Rent".to_owned()));
    }

    #[tokio::test]
    async fn item_json_uses_id_and_camel_case_timestamps() {
        let server = get_test_server();

        let body = server
            .post(endpoints::MASTER_DATA)
            .json(&json!({"title": "Food"}))
            .await
            .json::<Value>();

        assert!(body["_id"].is_i64());
        assert_eq!(body["title"], "Food");
        assert!(body["createdAt"].is_string());
        assert!(body["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn patch_and_put_both_update() {
        let server = get_test_server();
        let item = server
            .post(endpoints::MASTER_DATA)
            .json(&json!({"title": "Food"}))
            .await
            .json::<MasterData>();
        let path = format_endpoint(endpoints::MASTER_DATA_ITEM, item.id);

        let patched = server.patch(&path).json(&json!({"title": "Groceries"})).await;
        patched.assert_status_ok();
        assert_eq!(
            patched.json::<MasterData>().title,
            Title::new_unchecked("Groceries")
        );

        let put = server.put(&path).json(&json!({"title": "Dining"})).await;
        put.assert_status_ok();
        assert_eq!(
            put.json::<MasterData>().title,
            Title::new_unchecked("Dining")
        );
    }

    #[tokio::test]
    async fn update_missing_item_is_not_found() {
        let state = MasterDataEndpointState {
            store: SQLiteMasterDataStore::new(Database::in_memory()),
        };

        let result = update_master_data_endpoint(
            Path("999".to_owned()),
            State(state),
            JsonBody(MasterDataInput {
                title: Some("Rent".to_owned()),
            }),
        )
        .await;

        assert_eq!(result.err(), Some(Error::MasterDataNotFound));
    }

    #[tokio::test]
    async fn update_with_invalid_id_is_bad_request() {
        let server = get_test_server();

        let response = server
            .patch("/api/master-data/not-a-number")
            .json(&json!({"title": "Rent"}))
            .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({"error": "Invalid record ID"}));
    }

    #[tokio::test]
    async fn delete_responds_no_content_then_not_found() {
        let server = get_test_server();
        let item = server
            .post(endpoints::MASTER_DATA)
            .json(&json!({"title": "Food"}))
            .await
            .json::<MasterData>();
        let path = format_endpoint(endpoints::MASTER_DATA_ITEM, item.id);

        let response = server.delete(&path).await;
        response.assert_status(StatusCode::NO_CONTENT);
        assert!(response.text().is_empty());

        server.delete(&path).await.assert_status_not_found();
        server.get(&path).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn get_by_id_returns_item() {
        let database = Database::in_memory();
        let store = SQLiteMasterDataStore::new(database.clone());
        let item = store.create(Title::new_unchecked("Travel")).unwrap();
        let server = get_test_server_with_database(database);

        let response = server
            .get(&format_endpoint(endpoints::MASTER_DATA_ITEM, item.id))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<MasterData>(), item);
    }
}
