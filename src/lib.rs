//! This library provides a Rust implementation of the wire types of
//! [OpenID Connect for Identity Assurance 1.0] (eKYC & IDA), together with
//! the OAuth 2.0 error-object conventions they sit on.
//!
//! [OpenID Connect for Identity Assurance 1.0]: <https://openid.net/specs/openid-connect-4-identity-assurance-1_0.html>
//!
//! It is a pure data-mapping layer: every type is an immutable value object
//! with symmetric conversions between its in-memory representation and its
//! wire representation (a JSON object, or URL-encoded parameters where the
//! protocol uses them). There is no transport, no cryptography and no state
//! — parsing a caller's JSON never modifies it, and every produced value is
//! safe to share across threads.
//!
//! # Parsing verified claims
//!
//! The top of the data model is the `verified_claims` member delivered in ID
//! tokens and UserInfo responses:
//!
//! ```
//! use openid4ida::core::assurance::{TrustFramework, VerifiedClaims};
//! use serde_json::json;
//!
//! let verified_claims = VerifiedClaims::try_from(json!({
//!     "verification": {
//!         "trust_framework": "de_aml",
//!         "time": "2012-04-23T18:25Z",
//!         "evidence": [
//!             {
//!                 "type": "document",
//!                 "document_details": {
//!                     "type": "idcard",
//!                     "document_number": "53554554"
//!                 }
//!             }
//!         ]
//!     },
//!     "claims": { "given_name": "Max", "family_name": "Meier" }
//! }))?;
//!
//! assert_eq!(
//!     verified_claims.verification().trust_framework(),
//!     &TrustFramework::DeAml
//! );
//! # anyhow::Ok(())
//! ```
//!
//! # Evidence records
//!
//! Evidence is a discriminated union over the `type` member. The current
//! kinds (`document`, `electronic_record`, `vouch`, `electronic_signature`)
//! and the deprecated kinds still seen on the wire (`id_document`,
//! `utility_bill`, `qes`) are all distinct variants of
//! [`IdentityEvidence`]; an unrecognized `type` is a parse error naming the
//! offending string. Parsing dispatches on the discriminator and each
//! variant re-checks it independently.
//!
//! [`IdentityEvidence`]: crate::core::assurance::evidence::IdentityEvidence
//!
//! # Open-world enums
//!
//! Wire vocabularies such as trust frameworks, document types and method
//! types are open-world: the curated constants cover the registered values,
//! and any other string is carried in an `Other` variant rather than
//! rejected, so forward-compatible values round-trip unchanged.
//!
//! # Flattened addresses
//!
//! Issuer, source, provider and voucher objects carry the OpenID Connect
//! address claim in their own flat namespace rather than nested under an
//! `address` key. Parsing carves the standard address claim names out of the
//! object (see [`Address`]); serialization flattens them back in.
//!
//! [`Address`]: crate::core::address::Address

pub mod core;
pub mod utils;

#[cfg(test)]
mod tests;
