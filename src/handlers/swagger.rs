use axum::{
    extract::Path,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

/// Path (under `/swagger/`) of the OpenAPI document.
pub const OPENAPI_DOC: &str = "doc.json";

const SWAGGER_UI_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Pharmacy API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({ url: "/swagger/doc.json", dom_id: "#swagger-ui" });
  </script>
</body>
</html>
"##;

/// Serves API documentation under `/swagger/*`.
///
/// `/swagger/doc.json` is the OpenAPI document; every other path gets the
/// Swagger UI page pointed at it.
pub async fn swagger_handler(Path(path): Path<String>) -> Response {
    // ---
    if path == OPENAPI_DOC {
        Json(openapi_document()).into_response()
    } else {
        Html(SWAGGER_UI_PAGE).into_response()
    }
}

fn id_parameter() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "Medicine ID",
        "schema": { "type": "integer" }
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
    })
}

fn medicine_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Medicine" } } }
    })
}

fn medicine_body() -> Value {
    json!({
        "required": true,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Medicine" } } }
    })
}

/// OpenAPI 3 description of the medicine routes.
pub fn openapi_document() -> Value {
    // ---
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Pharmacy API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "This Server API is a simulator pharmacy."
        },
        "paths": {
            "/medicines": {
                "get": {
                    "summary": "Get Medicine",
                    "operationId": "get-medicines",
                    "responses": {
                        "200": {
                            "description": "All medicines",
                            "content": { "application/json": { "schema": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Medicine" }
                            } } }
                        }
                    }
                },
                "post": {
                    "summary": "Create New Medicine",
                    "operationId": "create-medicine",
                    "requestBody": medicine_body(),
                    "responses": {
                        "201": medicine_response("Created medicine"),
                        "400": error_response("Malformed body")
                    }
                }
            },
            "/medicines/{id}": {
                "get": {
                    "summary": "Get Medicine By ID",
                    "operationId": "get-medicine-by-id",
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": medicine_response("The medicine"),
                        "400": error_response("Unavailable ID"),
                        "404": error_response("Medicine is not exist")
                    }
                },
                "put": {
                    "summary": "Update Medicine",
                    "operationId": "update-medicine",
                    "parameters": [id_parameter()],
                    "requestBody": medicine_body(),
                    "responses": {
                        "200": medicine_response("Updated medicine"),
                        "400": error_response("Unavailable ID or malformed body"),
                        "404": error_response("Medicine is not exist")
                    }
                },
                "delete": {
                    "summary": "Delete Medicine",
                    "operationId": "delete-medicine",
                    "parameters": [id_parameter()],
                    "responses": {
                        "204": { "description": "No Content" },
                        "400": error_response("Unavailable ID"),
                        "404": error_response("Medicine is not exist")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Medicine": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "name": { "type": "string" },
                        "manufacturer": { "type": "string" },
                        "price": { "type": "number" },
                        "stock": { "type": "integer" }
                    }
                },
                "Error": {
                    "type": "object",
                    "properties": { "error": { "type": "string" } }
                }
            }
        }
    })
}
