use crate::models::query::RemotePlusQuery;

/// Serializes a query into the POST body Remote Plus expects.
///
/// The layout is positional and byte-exact:
///
/// ```text
/// Request=<urlencode("GET,(" + id1,id2,...)>),(item1,item2,...),yyyymmdd&Done=flag\n
/// ```
///
/// Only the `GET,(` prefix and the comma-joined identifier list are
/// percent-encoded; the item list, closing delimiters and date ride along as
/// literal bytes. That asymmetry is what the provider's CGI actually parses,
/// so it is reproduced here verbatim. A dateless query leaves the date
/// segment empty.
pub fn encode_body(query: &RemotePlusQuery) -> String {
    let identifiers = query.identifiers().join(",");
    let items = query.items().join(",");

    format!(
        "Request={}),({}),{}&Done=flag\n",
        urlencoding::encode(&format!("GET,({identifiers}")),
        items,
        query.wire_date(),
    )
}
