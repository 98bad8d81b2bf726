//! Namespace-resolved, in-memory XML tree.
//!
//! Manifests are small, so the whole document is read into an [`Element`]
//! tree up front with quick-xml's namespace-aware reader. Every element keeps
//! the namespace URI it resolved to, which is what the manifest queries match
//! on.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    namespace: Option<String>,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// The qualified name as written in the document, prefix included.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn is_named_in(&self, local_name: &str, namespace: &str) -> bool {
        self.local_name() == local_name && self.namespace() == Some(namespace)
    }

    pub fn namespace_starts_with(&self, prefix: &str) -> bool {
        self.namespace().is_some_and(|ns| ns.starts_with(prefix))
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    /// Direct children with the given local name in exactly `namespace`.
    pub fn children_in<'a>(
        &'a self,
        local_name: &'a str,
        namespace: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |child| child.is_named_in(local_name, namespace))
    }

    /// Every element below this one, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Character content directly inside this element, trimmed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: Element,
}

impl XmlDocument {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = NsReader::from_reader(bytes);
        let mut open: Vec<Element> = vec![];
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    open.push(Self::element(&reader, e)?);
                }
                Event::Empty(ref e) => {
                    let element = Self::element(&reader, e)?;
                    Self::close(element, &mut open, &mut root);
                }
                Event::End(_) => {
                    let element = open.pop().ok_or_else(|| {
                        Error::MalformedXml("closing tag without an open element".into())
                    })?;
                    Self::close(element, &mut open, &mut root);
                }
                Event::Text(ref e) => {
                    if let Some(current) = open.last_mut() {
                        let text = e.unescape().map_err(quick_xml::Error::from)?;
                        current.text.push_str(&text);
                    }
                }
                Event::CData(ref e) => {
                    if let Some(current) = open.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(Error::MalformedXml(format!(
                "element `{}` is never closed",
                unclosed.name
            )));
        }

        root.map(|root| XmlDocument { root })
            .ok_or_else(|| Error::MalformedXml("document has no root element".into()))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    fn element(reader: &NsReader<&[u8]>, start: &BytesStart) -> Result<Element> {
        let namespace = match reader.resolve_element(start.name()).0 {
            ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).into_owned()),
            _ => None,
        };

        let mut attributes = vec![];
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(quick_xml::Error::from)?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Element {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            namespace,
            attributes,
            children: vec![],
            text: String::new(),
        })
    }

    fn close(element: Element, open: &mut Vec<Element>, root: &mut Option<Element>) {
        match open.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => debug!("ignoring extra top-level element `{}`", element.name),
        }
    }
}

/// Integer coercion used for numeric attributes. The leading integer is
/// read and anything after it ignored, so `640px` is 640. Text without a
/// leading integer is zero.
pub fn int_value(name: &str, value: &str) -> i32 {
    let trimmed = value.trim();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    let prefix = &trimmed[..sign_len + digits_len];

    if prefix.len() != trimmed.len() {
        debug!("[{}] = {:?} has trailing text after the integer", name, value);
    }
    prefix.parse::<i32>().unwrap_or_else(|_| {
        debug!("[{}] = {:?} is not an int", name, value);
        0
    })
}

/// Float coercion used for numeric attributes and content. Unparseable text
/// is zero.
pub fn float_value(name: &str, value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or_else(|_| {
        debug!("[{}] = {:?} is not a number", name, value);
        0.0
    })
}
