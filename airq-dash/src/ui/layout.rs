//! Page skeleton and shared styles

use crate::api::buildinfo::BuildInfo;

/// Escape text for HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Percent-encode a query-string value
pub fn encode_query_value(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Wrap page content in the document skeleton
pub fn page(title: &str, body: &str) -> String {
    let build = BuildInfo::current();
    let short_hash = build.git_hash.get(..8).unwrap_or(&build.git_hash);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <header class="page-header">
        <h1><a href="/">UK AIR QUALITY DASHBOARD</a></h1>
    </header>
    <main class="container">
{body}
    </main>
    <footer class="page-footer">airq-dash v{version} ({hash} {profile}) built {built}</footer>
</body>
</html>"#,
        title = escape_html(title),
        css = CSS,
        body = body,
        version = build.version,
        hash = escape_html(short_hash),
        profile = escape_html(&build.build_profile),
        built = escape_html(&build.build_timestamp),
    )
}

const CSS: &str = r#"
* { box-sizing: border-box; }
body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    margin: 0;
    background: #f4f6f8;
    color: #333;
}
.page-header {
    background: white;
    border-bottom: 1px solid #e0e0e0;
    box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    padding: 8px 20px;
}
.page-header h1 { margin: 0; font-size: 1.4rem; font-weight: 700; }
.page-header a { color: #333; text-decoration: none; }
.container { max-width: 1200px; margin: 0 auto; padding: 20px; }
.page-footer { text-align: center; color: #888; font-size: 0.75rem; padding: 20px; }
.controls { display: flex; gap: 10px; align-items: center; margin-bottom: 20px; }
.controls select, .controls button { padding: 6px 10px; border: 1px solid #d0d7de; border-radius: 6px; }
.card {
    background: white;
    border-radius: 15px;
    padding: 20px;
    margin: 20px 0;
    box-shadow: 0 4px 15px rgba(0,0,0,0.1);
}
.card h2 { margin: 0 0 10px 0; font-size: 1.2rem; }
.muted { color: #666; font-size: 0.9rem; }
.aqi-main { display: flex; gap: 40px; align-items: center; justify-content: space-between; }
.aqi-value { font-size: 3.5rem; font-weight: bold; }
.aqi-status { font-size: 1.2rem; font-weight: bold; }
.weather { background: linear-gradient(135deg, #e3f2fd, #bbdefb); border-radius: 12px; padding: 15px; text-align: center; }
.scale-bar { display: flex; height: 4px; border-radius: 2px; overflow: hidden; margin: 15px 0 6px 0; }
.scale-bar div { flex: 1; }
.scale-labels { display: flex; justify-content: space-between; font-size: 0.65rem; color: #666; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 15px; }
.pollutant-card, .city-card {
    border-radius: 12px;
    padding: 15px;
    text-decoration: none;
    color: #333;
    border-left: 5px solid;
}
.pollutant-card .value, .city-card .value { font-size: 1.6rem; font-weight: bold; }
.legend-row { display: flex; align-items: center; gap: 10px; padding: 6px 0; }
.swatch { width: 18px; height: 18px; border-radius: 4px; }
table.ranking { width: 100%; border-collapse: collapse; font-size: 0.95rem; }
table.ranking th, table.ranking td { padding: 10px; text-align: left; border-bottom: 1px solid #eee; }
.badge { padding: 3px 10px; border-radius: 10px; font-weight: 600; }
.bars { display: flex; align-items: flex-end; gap: 2px; height: 160px; }
.bars div { flex: 1; border-radius: 2px 2px 0 0; }
.stats { display: flex; gap: 30px; margin-top: 15px; }
.stat-value { font-size: 1.3rem; font-weight: bold; }
.stat-label { font-size: 0.8rem; color: #666; }
svg.trend { width: 100%; height: 220px; background: #fafafa; border-radius: 8px; }
svg.map { width: 100%; height: auto; border-radius: 8px; }
svg.map .marker:hover { stroke: #333; }
.compare { display: flex; gap: 20px; align-items: flex-end; }
.compare-col { flex: 1; text-align: center; }
.compare-track { height: 180px; display: flex; align-items: flex-end; }
.compare-track .bar { width: 100%; border-radius: 4px 4px 0 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_encode_query_value() {
        assert_eq!(encode_query_value("London N. Kensington"), "London%20N.%20Kensington");
        assert_eq!(encode_query_value("a&b=c"), "a%26b%3Dc");
    }

    #[test]
    fn test_page_escapes_title() {
        let html = page("<Leeds>", "<p>body</p>");
        assert!(html.contains("<title>&lt;Leeds&gt;</title>"));
        assert!(html.contains("<p>body</p>"));
    }
}
