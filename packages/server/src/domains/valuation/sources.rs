use url::Url;

/// Portal names behind the citation URLs, deduplicated in first-seen order.
///
/// `https://www.fincaraiz.com.co/x` and `https://fincaraiz.com/y` both reduce
/// to `fincaraiz`. Falls back to `defaults` when nothing parses.
pub fn source_domains(urls: &[String], defaults: &[String]) -> Vec<String> {
    let mut domains: Vec<String> = Vec::new();

    for raw in urls {
        let Some(domain) = domain_token(raw) else {
            continue;
        };
        if !domains.contains(&domain) {
            domains.push(domain);
        }
    }

    if domains.is_empty() {
        return defaults.to_vec();
    }
    domains
}

fn domain_token(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    let host = url.host_str()?.to_lowercase();

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let host = host
        .strip_suffix(".com.co")
        .or_else(|| host.strip_suffix(".com"))
        .unwrap_or(host);

    (!host.is_empty()).then(|| host.to_string())
}
