use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::rdata::caa::Value as CaaValue;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use mpic_types::DnsRecordType;
use tracing::debug;

use crate::dns::{CaaRecord, DnsLookupOutcome, DnsRecordSet, DnsResolver, GenericRecord};
use crate::error::{Result, ResolverError};

fn to_record_type(record_type: DnsRecordType) -> RecordType {
    match record_type {
        DnsRecordType::Txt => RecordType::TXT,
        DnsRecordType::Cname => RecordType::CNAME,
        DnsRecordType::Caa => RecordType::CAA,
        DnsRecordType::A => RecordType::A,
        DnsRecordType::Aaaa => RecordType::AAAA,
    }
}

/// Re-renders a hickory-parsed CAA value back into the literal RFC 8659
/// value string (`issuer-domain[;tag=value;...]`) so that `mpic-caa` parses
/// it with the same grammar the reference implementation uses, rather than
/// trusting any one resolver library's structured CAA model.
fn render_caa_value(value: &CaaValue) -> String {
    match value {
        CaaValue::Issuer(name, params) => {
            let domain = name
                .as_ref()
                .map(|n| n.to_ascii().trim_end_matches('.').to_string())
                .unwrap_or_default();
            let mut rendered = domain;
            for kv in params {
                rendered.push(';');
                rendered.push_str(kv.key());
                rendered.push('=');
                rendered.push_str(kv.value());
            }
            rendered
        }
        CaaValue::Url(url) => url.to_string(),
        CaaValue::Unknown(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// `hickory_resolver::lookup::Lookup` is built from the resolver's internal
/// cache and only carries the query, the records, and a TTL-derived expiry;
/// it does not retain the response header, so the authenticated-data bit is
/// unavailable through this API. A raw-message client bypassing the cache
/// would expose it, at the cost of losing hickory's caching/retry behavior
/// for every lookup. Documented as a known limitation in DESIGN.md rather
/// than silently faked.
const AD_FLAG_UNAVAILABLE: bool = false;

/// DNS resolution backed by `hickory-resolver`, configured once per
/// coordinator process and shared via `Arc` across all checks (§5).
pub struct HickoryDnsResolver {
    inner: TokioAsyncResolver,
}

impl HickoryDnsResolver {
    pub fn new(config: ResolverConfig, opts: ResolverOpts) -> Self {
        Self {
            inner: TokioAsyncResolver::tokio(config, opts),
        }
    }

    pub fn from_system_conf() -> Result<Self> {
        let inner = TokioAsyncResolver::tokio_from_system_conf()
            .map_err(|e| ResolverError::Dns(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl DnsResolver for HickoryDnsResolver {
    async fn resolve_caa(&self, name: &str) -> Result<Option<DnsLookupOutcome>> {
        match self.inner.lookup(name, RecordType::CAA).await {
            Ok(lookup) => {
                let mut records = Vec::new();
                for record in lookup.record_iter() {
                    if let Some(RData::CAA(caa)) = record.data() {
                        records.push(CaaRecord {
                            flags: if caa.issuer_critical() { 0x80 } else { 0x00 },
                            tag: caa.tag().to_string().to_ascii_lowercase(),
                            value: render_caa_value(caa.value()),
                        });
                    }
                }
                Ok(Some(DnsLookupOutcome {
                    records: DnsRecordSet::Caa(records),
                    response_code: ResponseCode::NoError.low() as u16,
                    ad_flag: AD_FLAG_UNAVAILABLE,
                    found_at: name.trim_end_matches('.').to_string(),
                }))
            }
            Err(err) => match err.kind() {
                ResolveErrorKind::NoRecordsFound { response_code, .. } => {
                    debug!(%name, %response_code, "no CAA records at this node");
                    match *response_code {
                        ResponseCode::NXDomain | ResponseCode::NoError => Ok(None),
                        other => Err(ResolverError::Dns(format!(
                            "CAA lookup for {name} failed with {other}"
                        ))),
                    }
                }
                _ => Err(ResolverError::from(err)),
            },
        }
    }

    async fn resolve_generic(
        &self,
        name: &str,
        record_type: DnsRecordType,
    ) -> Result<DnsLookupOutcome> {
        let rtype = to_record_type(record_type);
        let lookup = self
            .inner
            .lookup(name, rtype)
            .await
            .map_err(ResolverError::from)?;
        let records = lookup
            .record_iter()
            .map(|record| GenericRecord {
                rdata_text: record
                    .data()
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
            })
            .collect();
        Ok(DnsLookupOutcome {
            records: DnsRecordSet::Generic(records),
            response_code: ResponseCode::NoError.low() as u16,
            ad_flag: AD_FLAG_UNAVAILABLE,
            found_at: name.trim_end_matches('.').to_string(),
        })
    }
}
