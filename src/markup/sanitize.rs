//! Allow-list sanitizing

use std::collections::{HashMap, HashSet};

use rustc_hash::{FxHashMap, FxHashSet};

/// Tags whose contents are dropped along with the tag.
const CLEAN_CONTENT_TAGS: [&str; 2] = ["script", "style"];

/// Elements and per-element attributes that survive sanitizing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    tags: FxHashMap<String, FxHashSet<String>>,
}

impl AllowList {
    /// An allow-list that strips every tag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup allowed around a line item price: sale price markup from the host.
    pub fn line_price() -> Self {
        Self::new()
            .allow("bdi", &[])
            .allow("del", &["aria-hidden"])
            .allow("ins", &[])
            .allow("span", &["class"])
    }

    /// Markup allowed in the savings total cell.
    pub fn savings_total() -> Self {
        Self::new().allow("del", &[]).allow("span", &["class"])
    }

    /// Allow `tag` with the given attributes, extending any already allowed.
    #[must_use]
    pub fn allow(mut self, tag: &str, attributes: &[&str]) -> Self {
        self.tags
            .entry(tag.to_ascii_lowercase())
            .or_default()
            .extend(attributes.iter().map(|attr| attr.to_ascii_lowercase()));

        self
    }

    /// Remove `tag` from the list.
    #[must_use]
    pub fn deny(mut self, tag: &str) -> Self {
        self.tags.remove(&tag.to_ascii_lowercase());
        self
    }

    /// Whether `tag` is allowed.
    pub fn allows(&self, tag: &str) -> bool {
        self.tags.contains_key(&tag.to_ascii_lowercase())
    }

    /// Whether `attribute` is allowed on `tag`.
    pub fn allows_attribute(&self, tag: &str, attribute: &str) -> bool {
        self.tags
            .get(&tag.to_ascii_lowercase())
            .is_some_and(|attrs| attrs.contains(&attribute.to_ascii_lowercase()))
    }
}

/// Strip everything from `html` that `allow` does not name.
///
/// Disallowed elements are removed but their text is kept, except for
/// `script` and `style` whose contents go too. Disallowed attributes and
/// comments are removed. Text is re-escaped. Nothing is added: allowed links
/// keep exactly the attributes they came with.
pub fn sanitize(html: &str, allow: &AllowList) -> String {
    let tags: HashSet<&str> = allow.tags.keys().map(String::as_str).collect();

    let tag_attributes: HashMap<&str, HashSet<&str>> = allow
        .tags
        .iter()
        .map(|(tag, attrs)| (tag.as_str(), attrs.iter().map(String::as_str).collect()))
        .collect();

    let clean_content_tags: HashSet<&str> = CLEAN_CONTENT_TAGS
        .into_iter()
        .filter(|tag| !tags.contains(tag))
        .collect();

    ammonia::Builder::empty()
        .tags(tags)
        .tag_attributes(tag_attributes)
        .clean_content_tags(clean_content_tags)
        .link_rel(None)
        .strip_comments(true)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_markup_passes_through() {
        let html = r#"<del aria-hidden="true"><span class="amount">100</span></del> <ins>80</ins>"#;

        assert_eq!(sanitize(html, &AllowList::line_price()), html);
    }

    #[test]
    fn disallowed_tags_are_stripped_keeping_text() {
        let html = r#"<div class="x"><strong>80</strong></div>"#;

        assert_eq!(sanitize(html, &AllowList::line_price()), "80");
    }

    #[test]
    fn script_contents_are_removed() {
        let html = "<span>80</span><script>alert(1)</script>";

        let clean = sanitize(html, &AllowList::savings_total());

        assert_eq!(clean, "<span>80</span>");
    }

    #[test]
    fn disallowed_attributes_are_removed() {
        let html = r#"<span class="amount" onclick="steal()" style="color:red">80</span>"#;

        assert_eq!(
            sanitize(html, &AllowList::savings_total()),
            r#"<span class="amount">80</span>"#
        );
    }

    #[test]
    fn savings_total_list_drops_ins_and_aria_hidden() {
        let html = r#"<del aria-hidden="true">100</del><ins>80</ins>"#;

        assert_eq!(sanitize(html, &AllowList::savings_total()), "<del>100</del>80");
    }

    #[test]
    fn allow_and_deny_edit_the_list() {
        let list = AllowList::savings_total().allow("STRONG", &["Title"]).deny("del");

        assert!(list.allows("strong"));
        assert!(list.allows_attribute("strong", "title"));
        assert!(!list.allows("del"));
        assert!(!list.allows_attribute("span", "style"));
    }

    #[test]
    fn links_keep_their_own_rel() {
        let html = r#"<a rel="nofollow" href="https://shop.example/promo">sale</a>"#;
        let allow = AllowList::savings_total().allow("a", &["href", "rel"]);

        assert_eq!(sanitize(html, &allow), html);
    }

    #[test]
    fn links_get_no_rel_added() {
        let html = r#"<a href="https://shop.example/promo">sale</a>"#;
        let allow = AllowList::savings_total().allow("a", &["href"]);

        let clean = sanitize(html, &allow);

        assert_eq!(clean, html);
        assert!(!clean.contains("rel="), "rel injected: {clean}");
    }

    #[test]
    fn empty_list_strips_everything() {
        assert_eq!(sanitize("<b>1</b><!-- note -->", &AllowList::new()), "1");
    }
}
