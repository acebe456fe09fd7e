//! Namespace-tolerant XML element tree.
//!
//! Ontology exporters disagree about namespace prefixes (`owl:Class`,
//! `Class`, `ns0:Class`, ...), so every lookup in this module matches on
//! the local, unprefixed name. No schema validation happens here: a
//! well-formed document with none of the expected elements still loads.
//!
//! General entities declared in the internal DTD subset
//! (`<!ENTITY obo "http://purl.obolibrary.org/obo/">`, as written by Protégé
//! and most OBO exporters) are expanded in attribute values and text.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{OntologyParseError, ParseResult};

/// A single attribute on an [`XmlElement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    prefix: Option<String>,
    local_name: String,
    value: String,
}

impl XmlAttribute {
    /// Namespace prefix as written in the document, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Attribute name without its prefix.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Unescaped attribute value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An element of the parsed document, with its children in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    prefix: Option<String>,
    local_name: String,
    attributes: Vec<XmlAttribute>,
    namespaces: Vec<(Option<String>, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>, entities: &EntityTable) -> Result<Self, String> {
        let name = start.name();
        let mut element = Self {
            prefix: name
                .prefix()
                .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned()),
            local_name: String::from_utf8_lossy(name.local_name().as_ref()).into_owned(),
            attributes: Vec::new(),
            namespaces: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        };

        for attr in start.attributes() {
            let attr = attr.map_err(|e| e.to_string())?;
            let value = attr
                .unescape_value_with(|name| entities.resolve(name))
                .map_err(|e| e.to_string())?
                .into_owned();
            let prefix = attr
                .key
                .prefix()
                .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned());
            let local_name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();

            match (prefix.as_deref(), local_name.as_str()) {
                (Some("xmlns"), _) => element.namespaces.push((Some(local_name), value)),
                (None, "xmlns") => element.namespaces.push((None, value)),
                _ => element.attributes.push(XmlAttribute {
                    prefix,
                    local_name,
                    value,
                }),
            }
        }

        Ok(element)
    }

    /// Namespace prefix as written in the document, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Element name without its prefix.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Returns `true` if the element's local name equals `name`.
    pub fn is(&self, name: &str) -> bool {
        self.local_name == name
    }

    /// All non-namespace attributes in document order.
    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    /// Looks up an attribute by local name, ignoring its prefix.
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    /// Like [`attribute`](Self::attribute) but skips blank values.
    pub fn non_empty_attribute(&self, local_name: &str) -> Option<&str> {
        self.attribute(local_name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Trimmed text content, or `None` when the element has no text.
    pub fn text(&self) -> Option<&str> {
        Some(self.text.trim()).filter(|t| !t.is_empty())
    }

    /// Direct child elements in document order.
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// First direct child with the given local name.
    pub fn child(&self, local_name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is(local_name))
    }

    /// All direct children with the given local name.
    pub fn children_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.is(local_name))
    }

    /// Namespace declarations made on this element (`None` = default namespace).
    pub fn namespace_declarations(&self) -> &[(Option<String>, String)] {
        &self.namespaces
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

/// A fully loaded XML document.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: XmlElement,
    namespaces: BTreeMap<String, String>,
}

impl XmlDocument {
    /// Parses a document from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyParseError`] if the input is not well-formed XML,
    /// has no root element, or ends inside an open element.
    pub fn from_reader<R: BufRead>(source: R) -> ParseResult<Self> {
        let mut reader = Reader::from_reader(source);

        let mut buf = Vec::new();
        let mut entities = EntityTable::default();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::DocType(doctype)) => {
                    entities = EntityTable::from_doctype(&String::from_utf8_lossy(&doctype));
                }
                Ok(Event::Start(start)) => {
                    let element = XmlElement::from_start(&start, &entities)
                        .map_err(|e| content_error(&reader, e))?;
                    stack.push(element);
                }
                Ok(Event::Empty(start)) => {
                    let element = XmlElement::from_start(&start, &entities)
                        .map_err(|e| content_error(&reader, e))?;
                    attach(&mut stack, &mut root, element)
                        .map_err(|e| content_error(&reader, e))?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| content_error(&reader, "unmatched closing tag"))?;
                    attach(&mut stack, &mut root, element)
                        .map_err(|e| content_error(&reader, e))?;
                }
                Ok(Event::Text(text)) => {
                    let unescaped = text
                        .unescape_with(|name| entities.resolve(name))
                        .map_err(|e| content_error(&reader, e))?;
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&unescaped);
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(xml_error(&reader, e)),
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(OntologyParseError::UnclosedElement(open.to_string()));
        }
        let root = root.ok_or(OntologyParseError::NoRootElement)?;

        let namespaces = root
            .namespaces
            .iter()
            .filter_map(|(prefix, uri)| {
                let prefix = prefix.as_ref()?;
                (!uri.is_empty()).then(|| (prefix.clone(), uri.clone()))
            })
            .collect();

        Ok(Self { root, namespaces })
    }

    /// Parses a document held in memory.
    pub fn parse_str(content: &str) -> ParseResult<Self> {
        Self::from_reader(content.as_bytes())
    }

    /// The document's root element.
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Prefixed namespaces declared on the root element (prefix → URI).
    pub fn namespaces(&self) -> &BTreeMap<String, String> {
        &self.namespaces
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), &'static str> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err("multiple root elements")
    }
}

/// General entities declared in the internal DTD subset.
#[derive(Debug, Default)]
struct EntityTable {
    values: HashMap<String, String>,
}

impl EntityTable {
    /// Collects `<!ENTITY name "value">` declarations from a DOCTYPE body.
    ///
    /// Parameter entities (`<!ENTITY % ...>`) and external entities
    /// (`SYSTEM` / `PUBLIC`) are ignored. References to earlier entities
    /// inside a value are expanded.
    fn from_doctype(doctype: &str) -> Self {
        let mut table = Self::default();
        for declaration in doctype.split("<!ENTITY").skip(1) {
            if let Some((name, value)) = parse_entity_declaration(declaration) {
                let value = table.expand(value);
                table.values.entry(name.to_string()).or_insert(value);
            }
        }
        table
    }

    fn resolve(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    fn expand(&self, value: &str) -> String {
        let mut expanded = value.to_string();
        for (name, replacement) in &self.values {
            expanded = expanded.replace(&format!("&{name};"), replacement);
        }
        expanded
    }
}

/// Splits `name "value">...` into its name and quoted value.
fn parse_entity_declaration(declaration: &str) -> Option<(&str, &str)> {
    let declaration = declaration.trim_start();
    if declaration.starts_with('%') {
        return None;
    }
    let name_end = declaration.find(char::is_whitespace)?;
    let (name, rest) = declaration.split_at(name_end);
    let rest = rest.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = &rest[1..];
    let end = body.find(quote)?;
    Some((name, &body[..end]))
}

/// An error raised by the reader itself while tokenizing.
fn xml_error<R>(reader: &Reader<R>, message: impl fmt::Display) -> OntologyParseError {
    OntologyParseError::Xml {
        position: reader.error_position(),
        message: message.to_string(),
    }
}

/// An error found in an event the reader returned successfully.
fn content_error<R>(reader: &Reader<R>, message: impl fmt::Display) -> OntologyParseError {
    OntologyParseError::Xml {
        position: reader.buffer_position(),
        message: message.to_string(),
    }
}
