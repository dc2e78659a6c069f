//! Project-specific utilities live here.

use serde_json::{json, Value};
use utoipa::ToSchema;

/// Value for the `Location` header of a newly created member.
pub fn location(collection: &str, id: i64) -> String {
    format!("/{collection}/{id}")
}

/// Component schema entry `(name, schema)` derived from a model type.
pub fn schema_of<T: ToSchema>() -> (String, Value) {
    let schema = serde_json::to_value(T::schema()).unwrap_or(Value::Null);
    (T::name().into_owned(), schema)
}

/// OpenAPI fragment for the five collection operations of one entity.
///
/// `entity` and `input` name component schemas; paths are relative to the
/// module mount point.
pub fn crud_openapi(tag: &str, entity: &str, input: &str, schemas: Vec<(String, Value)>) -> Value {
    let entity_ref = json!({ "$ref": format!("#/components/schemas/{entity}") });
    let input_ref = json!({ "$ref": format!("#/components/schemas/{input}") });
    let error_ref = json!({ "$ref": "#/components/schemas/ErrorResponse" });
    let id_param = json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    }]);
    let server_error = json!({
        "description": "Storage failure",
        "content": { "application/json": { "schema": error_ref } }
    });

    let components: serde_json::Map<String, Value> = schemas.into_iter().collect();

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": format!("List {tag}"),
                    "tags": [tag],
                    "responses": {
                        "200": {
                            "description": format!("All {tag}"),
                            "content": {
                                "application/json": {
                                    "schema": { "type": "array", "items": entity_ref }
                                }
                            }
                        },
                        "500": server_error
                    }
                },
                "post": {
                    "summary": format!("Create {entity}"),
                    "tags": [tag],
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": input_ref } }
                    },
                    "responses": {
                        "201": {
                            "description": "Created; `Location` points at the new member",
                            "headers": {
                                "Location": { "schema": { "type": "string" } }
                            },
                            "content": { "application/json": { "schema": entity_ref } }
                        },
                        "500": server_error
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": format!("Get {entity} by id"),
                    "tags": [tag],
                    "parameters": id_param,
                    "responses": {
                        "200": {
                            "description": entity,
                            "content": { "application/json": { "schema": entity_ref } }
                        },
                        "404": { "description": "No such id" },
                        "500": server_error
                    }
                },
                "put": {
                    "summary": format!("Update {entity}"),
                    "tags": [tag],
                    "parameters": id_param,
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": input_ref } }
                    },
                    "responses": {
                        "200": {
                            "description": "Updated",
                            "content": { "application/json": { "schema": entity_ref } }
                        },
                        "404": { "description": "No such id" },
                        "500": server_error
                    }
                },
                "delete": {
                    "summary": format!("Delete {entity}"),
                    "description": "Returns 204 whether or not the id existed",
                    "tags": [tag],
                    "parameters": id_param,
                    "responses": {
                        "204": { "description": "Deleted or already absent" },
                        "500": server_error
                    }
                }
            }
        },
        "components": {
            "schemas": components
        }
    })
}
