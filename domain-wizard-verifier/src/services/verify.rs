//! MX/SPF/DKIM/DMARC checks.
//!
//! Lookups and grading are separated: the `lookup_*` functions collect raw
//! record values (a failed lookup yields an empty set), the `grade_*`
//! functions turn those values into a [`RecordCheck`].

use futures::join;

use crate::types::{DnsCheckKind, DnsVerificationReport, ExpectedRecords, RecordCheck};

use super::resolver::DEFAULT_RESOLVER;

/// Run all four checks concurrently and aggregate the report.
pub(crate) async fn verify_domain(
    domain: &str,
    expected: &ExpectedRecords,
) -> DnsVerificationReport {
    let dkim_name = format!("{}._domainkey.{domain}", expected.dkim_selector);
    let dmarc_name = format!("_dmarc.{domain}");

    let (mx, apex_txt, dkim_txt, dmarc_txt) = join!(
        lookup_mx(domain),
        lookup_txt(domain),
        lookup_txt(&dkim_name),
        lookup_txt(&dmarc_name),
    );

    let checks = [
        (DnsCheckKind::Mx, grade_mx(&mx, &expected.mx_host)),
        (DnsCheckKind::Spf, grade_spf(&apex_txt, &expected.server_ip)),
        (DnsCheckKind::Dkim, grade_dkim(&dkim_txt, &dkim_name)),
        (DnsCheckKind::Dmarc, grade_dmarc(&dmarc_txt)),
    ];

    DnsVerificationReport {
        domain: domain.to_string(),
        checks: checks.into_iter().collect(),
    }
}

/// Collect MX exchange hosts, trailing dot stripped.
async fn lookup_mx(domain: &str) -> Vec<String> {
    match DEFAULT_RESOLVER.mx_lookup(domain).await {
        Ok(response) => response
            .iter()
            .map(|mx| {
                mx.exchange()
                    .to_string()
                    .trim_end_matches('.')
                    .to_lowercase()
            })
            .collect(),
        Err(e) => {
            log::debug!("MX lookup for {domain} returned no records: {e}");
            Vec::new()
        }
    }
}

/// Collect TXT record values, character strings concatenated per record.
async fn lookup_txt(name: &str) -> Vec<String> {
    match DEFAULT_RESOLVER.txt_lookup(name).await {
        Ok(response) => response
            .iter()
            .map(|txt| {
                txt.iter()
                    .map(|data| String::from_utf8_lossy(data).to_string())
                    .collect::<String>()
            })
            .collect(),
        Err(e) => {
            log::debug!("TXT lookup for {name} returned no records: {e}");
            Vec::new()
        }
    }
}

fn grade_mx(exchanges: &[String], expected_host: &str) -> RecordCheck {
    let expected = expected_host.to_lowercase();
    if exchanges.iter().any(|host| *host == expected) {
        return RecordCheck::pass(
            format!("MX record points at {expected}"),
            exchanges.to_vec(),
        );
    }
    if exchanges.is_empty() {
        return RecordCheck::fail("No MX record found", Vec::new());
    }
    RecordCheck::fail(
        format!(
            "MX records found ({}) but none point at {expected}",
            exchanges.join(", ")
        ),
        exchanges.to_vec(),
    )
}

fn grade_spf(txt_records: &[String], server_ip: &str) -> RecordCheck {
    let spf: Vec<&String> = txt_records
        .iter()
        .filter(|txt| txt.starts_with("v=spf1"))
        .collect();

    let Some(record) = spf.first() else {
        return RecordCheck::fail("No SPF record found", Vec::new());
    };

    if spf_authorizes(record, server_ip) {
        RecordCheck::pass(
            format!("SPF record authorizes {server_ip}"),
            vec![(*record).clone()],
        )
    } else {
        RecordCheck::warning(
            format!("SPF record found but it does not authorize {server_ip}"),
            vec![(*record).clone()],
        )
    }
}

/// Whether the record carries an `ip4` mechanism for exactly this address.
///
/// Mechanisms are whole terms; a substring test would accept `ip4:1.2.3.45`
/// for server IP `1.2.3.4`. An optional `+` qualifier and a CIDR suffix
/// (`/32`) are accepted.
fn spf_authorizes(record: &str, server_ip: &str) -> bool {
    let mechanism = format!("ip4:{server_ip}");
    record.split_whitespace().any(|term| {
        let term = term.strip_prefix('+').unwrap_or(term);
        term == mechanism
            || term
                .strip_prefix(mechanism.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

fn grade_dkim(txt_records: &[String], dkim_name: &str) -> RecordCheck {
    if txt_records.is_empty() {
        return RecordCheck::fail(format!("No DKIM record found at {dkim_name}"), Vec::new());
    }
    if let Some(record) = txt_records.iter().find(|txt| txt.contains("v=DKIM1")) {
        RecordCheck::pass("DKIM public key record found", vec![record.clone()])
    } else {
        RecordCheck::warning(
            format!("TXT record at {dkim_name} is not a DKIM1 key"),
            txt_records.to_vec(),
        )
    }
}

fn grade_dmarc(txt_records: &[String]) -> RecordCheck {
    let Some(record) = txt_records.iter().find(|txt| txt.starts_with("v=DMARC1")) else {
        return RecordCheck::fail("No DMARC record found", Vec::new());
    };

    // p=none means monitor-only; mail is neither quarantined nor rejected.
    let policy_none = record
        .split(';')
        .map(str::trim)
        .any(|tag| tag == "p=none");
    if policy_none {
        RecordCheck::warning(
            "DMARC record present but policy is p=none",
            vec![record.clone()],
        )
    } else {
        RecordCheck::pass("DMARC record found", vec![record.clone()])
    }
}
