//! Shape of the `users` collection and its validation rules.
//!
//! The provider creates and mutates these documents; this service only
//! pins down what the collection accepts.

use chrono::{DateTime, Utc};
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const USERS_COLLECTION: &str = "users";

/// Accepted identity documents.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdentityDocumentType {
    Passport,
    DriversLicense,
    NationalId,
    VotersCard,
}

/// Postal address. Street, town and state are only mandatory once a unit
/// number is given; the collection validator carries that rule.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A user document as the provider persists it.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_document_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_document_type: Option<IdentityDocumentType>,
}

/// `$jsonSchema` validator enforced on the collection.
///
/// Email uniqueness is not expressible here; it is a unique index, created
/// next to this validator at startup.
#[must_use]
pub fn user_schema() -> Document {
    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": ["firstName", "lastName", "email", "phone"],
            "properties": {
                "firstName": {
                    "bsonType": "string",
                    "minLength": 3,
                    "description": "Firstname must be at least 3 characters long"
                },
                "lastName": {
                    "bsonType": "string",
                    "minLength": 3,
                    "description": "Lastname must be at least 3 characters long"
                },
                "email": {
                    "bsonType": "string",
                    "description": "Email is required"
                },
                "phone": {
                    "bsonType": "string",
                    "minLength": 11,
                    "maxLength": 11,
                    "description": "Phone number must be exactly 11 characters long"
                },
                "dateOfBirth": {
                    "bsonType": "date"
                },
                "address": {
                    "bsonType": "object",
                    "properties": {
                        "number": { "bsonType": "string" },
                        "street": { "bsonType": "string" },
                        "town": { "bsonType": "string" },
                        "state": { "bsonType": "string" }
                    },
                    "dependencies": {
                        "number": ["street", "town", "state"]
                    }
                },
                "identityDocumentUrl": {
                    "bsonType": "string"
                },
                "identityDocumentType": {
                    "enum": ["passport", "drivers_license", "national_id", "voters_card"]
                }
            }
        }
    }
}
