//! コンペンディウムXMLの読み込み・変更・書き出し
//!
//! quick-xml のイベントから最小限のツリーを組み立て、
//! エントリに `image` / `token` 要素を追加したうえで再シリアライズする。
//! 宣言は常に UTF-8 で出力し、コメント（ルートの前後も）と DOCTYPE は保持する。

pub mod source;

pub use source::CompendiumSource;

use crate::error::{CompendiumError, Result};
use compendium_images_common::{EntryKind, TagKind};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fmt::Display;

/// アーカイブ内のコンペンディウム本体のファイル名
pub const COMPENDIUM_XML: &str = "compendium.xml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.children.push(Node::Text(text.into()));
        element
    }

    /// 指定名の最初の子要素
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// 直下のテキストを連結
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) | Node::CData(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// 子要素を末尾に追加する
    ///
    /// 閉じタグ前のインデントがあれば、その手前に同じインデントで挿入する。
    pub fn push_child(&mut self, child: Element) {
        let child = Node::Element(child);
        let trailing = matches!(self.children.last(), Some(Node::Text(t)) if t.trim().is_empty());
        if !trailing {
            self.children.push(child);
            return;
        }

        let indent = self.children.iter().rev().skip(1).find_map(|n| match n {
            Node::Text(t) if t.trim().is_empty() => Some(t.clone()),
            _ => None,
        });
        let at = self.children.len() - 1;
        self.children.insert(at, child);
        if let Some(indent) = indent {
            self.children.insert(at, Node::Text(indent));
        }
    }
}

/// パース済みのコンペンディウム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// ルート要素より前の DOCTYPE・コメント
    prolog: Vec<Node>,
    doctype: Option<String>,
    pub root: Element,
    /// ルート要素より後のコメント
    epilog: Vec<Node>,
}

impl Document {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let xml = std::str::from_utf8(bytes).map_err(xml_error)?;
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);

        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut doctype = None;
        let mut root = None;

        loop {
            match reader.read_event().map_err(|e| {
                CompendiumError::Xml(format!("Error at position {}: {}", reader.buffer_position(), e))
            })? {
                Event::Start(e) => stack.push(start_element(&e)?),
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| CompendiumError::Xml("unexpected closing tag".into()))?;
                    attach(&mut stack, &mut root, Node::Element(element))?;
                }
                Event::Empty(e) => {
                    let element = start_element(&e)?;
                    attach(&mut stack, &mut root, Node::Element(element))?;
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(xml_error)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Text(text.into_owned()));
                    }
                }
                Event::CData(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                        parent.children.push(Node::CData(text));
                    }
                }
                Event::Comment(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Comment(text)),
                        None if root.is_none() => prolog.push(Node::Comment(text)),
                        None => epilog.push(Node::Comment(text)),
                    }
                }
                Event::DocType(e) => doctype = Some(String::from_utf8_lossy(&e).into_owned()),
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(CompendiumError::Xml(format!("unclosed element <{}>", stack[stack.len() - 1].name)));
        }
        let root = root.ok_or_else(|| CompendiumError::Xml("no root element".into()))?;

        Ok(Self {
            prolog,
            doctype,
            root,
            epilog,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;
        write_text(&mut writer, "\n")?;

        if let Some(doctype) = &self.doctype {
            writer
                .write_event(Event::DocType(BytesText::from_escaped(doctype.as_str())))
                .map_err(xml_error)?;
            write_text(&mut writer, "\n")?;
        }
        for node in &self.prolog {
            write_node(&mut writer, node)?;
            write_text(&mut writer, "\n")?;
        }
        write_element(&mut writer, &self.root)?;
        for node in &self.epilog {
            write_text(&mut writer, "\n")?;
            write_node(&mut writer, node)?;
        }

        Ok(writer.into_inner())
    }

    /// ルート直下の要素（文書順）
    pub fn top_level_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.root.elements_mut()
    }
}

/// `monster` / `item` 要素のビュー
#[derive(Debug)]
pub struct Entry<'a> {
    pub kind: EntryKind,
    element: &'a mut Element,
}

impl<'a> Entry<'a> {
    /// 対象外の要素なら `None`
    pub fn from_element(element: &'a mut Element) -> Option<Self> {
        let kind = EntryKind::from_tag(&element.name)?;
        Some(Self { kind, element })
    }

    /// `name` 子要素の表示名
    pub fn name(&self) -> Option<String> {
        let name = self.element.child("name")?.text();
        let name = name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }

    pub fn has_tag(&self, tag: TagKind) -> bool {
        self.element.child(tag.as_str()).is_some()
    }

    pub fn attach(&mut self, tag: TagKind, file_name: &str) {
        self.element.push_child(Element::with_text(tag.as_str(), file_name));
    }
}

fn start_element(e: &BytesStart) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    for attr in e.attributes() {
        let attr = attr.map_err(xml_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_error)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, node: Node) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            let Node::Element(element) = node else {
                return Ok(());
            };
            if root.is_some() {
                return Err(CompendiumError::Xml("multiple root elements".into()));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(xml_error);
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(xml_error)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<()> {
    match node {
        Node::Element(e) => write_element(writer, e),
        Node::Text(t) => write_text(writer, t),
        Node::CData(t) => writer
            .write_event(Event::CData(quick_xml::events::BytesCData::new(t.as_str())))
            .map_err(xml_error),
        Node::Comment(t) => writer
            .write_event(Event::Comment(BytesText::from_escaped(t.as_str())))
            .map_err(xml_error),
    }
}

fn write_text(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<()> {
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)
}

fn xml_error(e: impl Display) -> CompendiumError {
    CompendiumError::Xml(e.to_string())
}
