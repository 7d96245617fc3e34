//! # Pordisto (User Onboarding API)
//!
//! `pordisto` fronts an external authentication provider with a small JSON
//! API: account registration, login and email-link verification. Request
//! handling is a thin adapter: payloads pass through to the provider, whose
//! responses are reshaped into the service envelope
//! `{success?, message, data?}` with provider session cookies forwarded
//! verbatim.
//!
//! The one piece of real decision logic is email verification: a provider
//! failure that arrives with a fresh session cookie means the link was
//! already consumed and is reported as success, while genuine failures
//! surface the reason code hidden in the provider's redirect `location`
//! header.
//!
//! User documents live in MongoDB; their validation rules and the unique
//! email index are enforced on the collection itself at startup. The
//! provider owns every read and write of those documents.

pub mod auth;
pub mod cli;
pub mod db;
pub mod pordisto;
