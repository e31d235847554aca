//! # cloudfrontier-aws
//!
//! Service boundaries for the certificate and DNS collaborators, modeled
//! as request/response contracts behind async traits, plus the certificate
//! selection algorithm. No network client lives here.

pub mod acm;
pub mod resolver;
pub mod route53;

pub use acm::{CertificateService, CertificateStatus, CertificateSummary};
pub use resolver::resolve_certificate;
pub use route53::{AliasTarget, AliasUpsert, DnsService};
