//! Machine-readable API description.

use serde_json::{json, Value};

use crate::config::ApiConfig;

/// Build the OpenAPI 3.1 document for the hello routes.
pub fn openapi_document(api: &ApiConfig) -> Value {
    let hello = api.path("/hello");

    json!({
        "openapi": "3.1.0",
        "info": {
            "title": api.title,
            "version": api.version,
        },
        "paths": {
            (hello): {
                "get": {
                    "summary": "Hello",
                    "description": "Describe the request: method, path, headers, query parameters, client and URL.",
                    "operationId": "hello_get",
                    "responses": {
                        "200": {
                            "description": "Successful Response",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/RequestDescription" }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "summary": "Hello Post",
                    "description": "Describe the request including its body, parsed as JSON when possible, otherwise as text.",
                    "operationId": "hello_post",
                    "responses": {
                        "200": {
                            "description": "Successful Response",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/RequestDescriptionWithBody" }
                                }
                            }
                        },
                        "413": { "description": "Request body too large" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Client": {
                    "type": "object",
                    "properties": {
                        "host": { "type": ["string", "null"] },
                        "port": { "type": ["integer", "null"] }
                    },
                    "required": ["host", "port"]
                },
                "RequestDescription": description_schema(false),
                "RequestDescriptionWithBody": description_schema(true),
            }
        }
    })
}

fn description_schema(with_body: bool) -> Value {
    let string_map = json!({ "type": "object", "additionalProperties": { "type": "string" } });
    let mut schema = json!({
        "type": "object",
        "properties": {
            "message": { "type": "string" },
            "path": { "type": "string" },
            "method": { "type": "string" },
            "headers": string_map,
            "query_params": string_map,
            "client": { "$ref": "#/components/schemas/Client" },
            "url": { "type": "string" }
        },
        "required": ["message", "path", "method", "headers", "query_params", "client", "url"]
    });

    if with_body {
        schema["properties"]["body"] = json!({ "description": "Parsed JSON value, raw text, or null" });
        if let Some(required) = schema["required"].as_array_mut() {
            required.push(json!("body"));
        }
    }
    schema
}
