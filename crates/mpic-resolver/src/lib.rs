//! DNS and HTTP resolution abstractions shared by the CAA and DCV checkers.
//!
//! Neither `mpic-caa` nor `mpic-dcv` talks to a resolver crate or an HTTP
//! client directly; they depend only on the [`DnsResolver`] and
//! [`HttpFetcher`] traits defined here, the same way `smtp::auth::spf`
//! decouples SPF evaluation from DNS transport behind `SpfDnsResolver`. Two
//! concrete, network-backed implementations are provided
//! ([`HickoryDnsResolver`], [`ReqwestHttpFetcher`]); test doubles live in
//! [`mock`] for use by this crate and its dependents.

mod dns;
mod error;
mod hickory;
mod http;
mod reqwest_client;

pub mod mock;

pub use dns::{
    resolve_caa_with_tree_walk, CaaRecord, DnsLookupOutcome, DnsRecordSet, DnsResolver,
    GenericRecord,
};
pub use error::{Result, ResolverError};
pub use hickory::HickoryDnsResolver;
pub use http::{HttpFetchOutcome, HttpFetcher};
pub use reqwest_client::ReqwestHttpFetcher;
