use async_trait::async_trait;
use mpic_types::DnsRecordType;

use crate::error::{Result, ResolverError};

/// A single CAA resource record as RFC 8659 defines it: a flags byte, a tag,
/// and an ASCII value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaaRecord {
    pub flags: u8,
    pub tag: String,
    pub value: String,
}

impl CaaRecord {
    pub fn is_critical(&self) -> bool {
        self.flags & 0b1000_0000 != 0
    }
}

/// A non-CAA resource record, reduced to its textual rendering. TXT records
/// keep any enclosing quotes exactly as the resolver library renders them;
/// callers strip one matching pair per the DCV record-extraction rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericRecord {
    pub rdata_text: String,
}

#[derive(Debug, Clone)]
pub enum DnsRecordSet {
    Caa(Vec<CaaRecord>),
    Generic(Vec<GenericRecord>),
}

/// The full observable result of a DNS lookup: the records themselves plus
/// the header bits a DCV check reports back (`response_code`, `ad_flag`) and
/// the name at which the answer was actually found (relevant after a CAA
/// tree walk climbs past the originally requested name).
#[derive(Debug, Clone)]
pub struct DnsLookupOutcome {
    pub records: DnsRecordSet,
    pub response_code: u16,
    pub ad_flag: bool,
    pub found_at: String,
}

/// Abstraction over DNS resolution so that `mpic-caa` and `mpic-dcv` do not
/// depend directly on a particular resolver crate, mirroring the way the
/// `SpfDnsResolver` trait decouples SPF evaluation from DNS transport.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolve CAA records at exactly `name` (no tree walk). `Ok(None)`
    /// means the node answered NXDOMAIN or NOERROR-with-no-data; any other
    /// failure is a hard error.
    async fn resolve_caa(&self, name: &str) -> Result<Option<DnsLookupOutcome>>;

    /// Resolve a non-CAA record type at exactly `name`. Unlike `resolve_caa`
    /// this never implies a tree walk; a missing answer is a hard error, the
    /// same way the reference DCV implementation treats NXDOMAIN as fatal
    /// for non-CAA DCV lookups.
    async fn resolve_generic(
        &self,
        name: &str,
        record_type: DnsRecordType,
    ) -> Result<DnsLookupOutcome>;
}

fn parent_domain(name: &str) -> Option<String> {
    name.split_once('.').map(|(_, rest)| rest.to_string())
}

/// Climb from `target` toward the DNS root, stopping at the first node that
/// answers with a non-empty CAA record set. Returns `Ok(None)` if the walk
/// reaches the root with no records found anywhere along the way.
pub async fn resolve_caa_with_tree_walk(
    resolver: &dyn DnsResolver,
    target: &str,
) -> Result<Option<DnsLookupOutcome>> {
    let mut name = target.trim_end_matches('.').to_string();
    loop {
        match resolver.resolve_caa(&name).await? {
            Some(outcome) => return Ok(Some(outcome)),
            None => match parent_domain(&name) {
                Some(parent) => name = parent,
                None => return Ok(None),
            },
        }
    }
}
