//! Link builder: pure functions mapping row fields to deep-link URLs.
//!
//! Both builders are deterministic string templates with no I/O; the same
//! inputs always produce the same URL byte-for-byte.

use crate::error::{Error, Result};

/// Base host of the Browse Query Editor.
pub const BQE_HOST: &str = "https://browse-query-editor-na.aka.amazon.com/";

/// Base host of the orphan tool.
pub const ORPHAN_TOOL_HOST: &str = "https://vermont.amazon.com";

/// Catalog attributes requested in every BQE link, pre-encoded.
const BQE_CATALOG_ATTRIBUTES: &str = "item_name%2Cbrand%2Cdepartment%2Cstyle%2Cmodel_name%2Cmodel_number%2Ccolor%2Csize%2Cproduct_type";

/// Build a Browse Query Editor deep link for a set of ASINs in one
/// marketplace. The ASINs are joined with `+` into the `userQuery`
/// parameter; every other parameter is fixed.
pub fn build_browse_query_link<S: AsRef<str>>(marketplace_id: i64, asins: &[S]) -> String {
    let user_query = asins
        .iter()
        .map(|a| a.as_ref())
        .collect::<Vec<_>>()
        .join("+");
    format!(
        "{}?browseNodeFilter=category-node-merchant-facing\
         &catalogAttributes={}\
         &marketplaceId={}\
         &pageSize=500\
         &protocolVersion=imsv2\
         &retailAsins=N\
         &showImages=Y\
         &useSuggestedBrowseNode=N\
         &userQuery={}\
         &variationParentOnly=N\
         &websiteSearchable=N",
        BQE_HOST, BQE_CATALOG_ATTRIBUTES, marketplace_id, user_query
    )
}

/// Build an orphan-tool deep link for one parent item in one marketplace.
pub fn build_orphan_tool_link(marketplace_id: i64, parent_item_id: &str) -> String {
    format!(
        "{}/orphan-tool/{}/{}",
        ORPHAN_TOOL_HOST, marketplace_id, parent_item_id
    )
}

/// Parse a marketplace_id field into an integer.
///
/// Non-numeric input is an `Error::Value`; it must never silently coerce
/// to zero.
pub fn parse_marketplace_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::Value(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browse_query_link_matches_fixed_template() {
        let link = build_browse_query_link(44, &["A1", "A2", "A3"]);
        assert_eq!(
            link,
            "https://browse-query-editor-na.aka.amazon.com/\
             ?browseNodeFilter=category-node-merchant-facing\
             &catalogAttributes=item_name%2Cbrand%2Cdepartment%2Cstyle%2Cmodel_name%2Cmodel_number%2Ccolor%2Csize%2Cproduct_type\
             &marketplaceId=44\
             &pageSize=500\
             &protocolVersion=imsv2\
             &retailAsins=N\
             &showImages=Y\
             &useSuggestedBrowseNode=N\
             &userQuery=A1+A2+A3\
             &variationParentOnly=N\
             &websiteSearchable=N"
        );
    }

    #[test]
    fn browse_query_link_is_deterministic() {
        let a = build_browse_query_link(7, &["B00X", "B00Y"]);
        let b = build_browse_query_link(7, &["B00X", "B00Y"]);
        assert_eq!(a, b);
        assert!(a.contains("marketplaceId=7"));
        assert!(a.contains("userQuery=B00X+B00Y"));
    }

    #[test]
    fn orphan_tool_link_formats_host_and_path() {
        assert_eq!(
            build_orphan_tool_link(44, "P123"),
            "https://vermont.amazon.com/orphan-tool/44/P123"
        );
    }

    #[test]
    fn marketplace_id_parses_integers_only() {
        assert_eq!(parse_marketplace_id("44").unwrap(), 44);
        assert_eq!(parse_marketplace_id(" 7 ").unwrap(), 7);
        for bad in ["", "ATVPDKIKX0DER", "44.5", "4x4"] {
            let err = parse_marketplace_id(bad).unwrap_err();
            match err {
                crate::error::Error::Value(raw) => assert_eq!(raw, bad),
                other => panic!("expected Value error, got {:?}", other),
            }
        }
    }
}
