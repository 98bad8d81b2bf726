//! Per-document state: where a manifest came from, which namespace and
//! version it declares, and at which level it sits.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::grammar::{Grammar, Level, Version};
use crate::parsers::xml::{Element, XmlDocument};

/// Every F4M namespace starts with this; the version follows it.
pub const F4M_NAMESPACE_BASE: &str = "http://ns.adobe.com/f4m/";

pub struct ManifestDocument {
    url: String,
    namespace: String,
    grammar: Grammar,
    xml: XmlDocument,
}

impl ManifestDocument {
    /// Reads a manifest out of a parsed xml tree.
    ///
    /// `reached_through_href` is set for stream-level manifests fetched on
    /// behalf of a set-level parent; it forces the level regardless of
    /// content.
    pub fn new(url: &str, xml: XmlDocument, reached_through_href: bool) -> Result<Self> {
        let root = xml.root();
        if root.local_name() != "manifest" {
            return Err(Error::UnexpectedRoot {
                expected: "manifest",
                found: root.name().to_string(),
            });
        }

        let namespace = root.namespace().ok_or(Error::MissingNamespace)?.to_string();
        let suffix = namespace
            .strip_prefix(F4M_NAMESPACE_BASE)
            .ok_or_else(|| Error::UnsupportedNamespace(namespace.clone()))?;

        let version = Self::detect_version(suffix, root.attribute("version"));
        let has_href_media = Self::has_href_media(root, &namespace);
        let level = Level::detect(reached_through_href, version, has_href_media);
        debug!("manifest {} is version {} at {:?}", url, version, level);

        Ok(ManifestDocument {
            url: url.to_string(),
            namespace,
            grammar: Grammar::new(version, level),
            xml,
        })
    }

    /// The namespace suffix names the version; a `version` attribute on the
    /// root overrides it.
    fn detect_version(namespace_suffix: &str, version_attribute: Option<&str>) -> Version {
        let declared = match version_attribute {
            Some(value) if !value.trim().is_empty() => value,
            _ => namespace_suffix,
        };

        Version::parse(declared).unwrap_or_else(|| {
            warn!("unparseable manifest version {:?}, assuming 1.0", declared);
            Version::default()
        })
    }

    fn has_href_media(root: &Element, namespace: &str) -> bool {
        root.descendants().any(|element| {
            element.is_named_in("media", namespace)
                && element.attribute("href").is_some_and(|href| !href.is_empty())
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    pub fn root(&self) -> &Element {
        self.xml.root()
    }

    /// `/manifest/<name>` in the root namespace.
    pub fn elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.root().children_in(name, &self.namespace)
    }

    /// `/manifest/*` in the root namespace.
    pub fn scope_elements(&self) -> impl Iterator<Item = &Element> {
        self.root()
            .children()
            .filter(|child| child.namespace() == Some(self.namespace.as_str()))
    }

    /// Nested elements only need to sit in some F4M namespace.
    pub fn in_f4m_namespace(element: &Element, name: &str) -> bool {
        element.local_name() == name && element.namespace_starts_with(F4M_NAMESPACE_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(xml: &str, reached_through_href: bool) -> Result<ManifestDocument> {
        let xml = XmlDocument::parse(xml.as_bytes())?;
        ManifestDocument::new("http://example.com/m.f4m", xml, reached_through_href)
    }

    #[test]
    fn version_from_namespace() {
        let doc = load(r#"<manifest xmlns="http://ns.adobe.com/f4m/2.0"/>"#, false).unwrap();
        assert_eq!(doc.grammar().version, Version::V2_0);
        assert_eq!(doc.grammar().level, Level::SingleLevel);
    }

    #[test]
    fn version_attribute_overrides_namespace() {
        let doc = load(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/2.0" version="3.0"/>"#,
            false,
        )
        .unwrap();
        assert_eq!(doc.grammar().version, Version::V3_0);
    }

    #[test]
    fn bad_version_falls_back_to_one() {
        let doc = load(r#"<manifest xmlns="http://ns.adobe.com/f4m/"/>"#, false).unwrap();
        assert_eq!(doc.grammar().version, Version::V1_0);
    }

    #[test]
    fn href_media_makes_a_set_level() {
        let xml = r#"<manifest xmlns="http://ns.adobe.com/f4m/3.0">
            <adaptiveSet><media href="low.f4m"/></adaptiveSet>
        </manifest>"#;
        assert_eq!(load(xml, false).unwrap().grammar().level, Level::SetLevel);
        assert_eq!(load(xml, true).unwrap().grammar().level, Level::StreamLevel);

        let v1 = r#"<manifest xmlns="http://ns.adobe.com/f4m/1.0"><media href="x"/></manifest>"#;
        assert_eq!(load(v1, false).unwrap().grammar().level, Level::SingleLevel);
    }

    #[test]
    fn rejects_foreign_roots_and_namespaces() {
        assert!(matches!(
            load(r#"<MPD xmlns="http://ns.adobe.com/f4m/1.0"/>"#, false),
            Err(Error::UnexpectedRoot { .. })
        ));
        assert!(matches!(
            load("<manifest/>", false),
            Err(Error::MissingNamespace)
        ));
        assert!(matches!(
            load(r#"<manifest xmlns="urn:mpeg:dash:schema:mpd:2011"/>"#, false),
            Err(Error::UnsupportedNamespace(_))
        ));
    }
}
