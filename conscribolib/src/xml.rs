//! Явное XML-дерево: имя, текст, упорядоченные потомки.
//!
//! Разбор и запись идут через событийный API quick-xml; атрибуты протоколу
//! не нужны и отбрасываются.

use crate::error::{ConscriboError, Result};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Reader, Writer,
};
use std::io::Write;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Добавляет потомка и возвращает ссылку на него.
    pub fn push(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn push_text_child(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.children.push(Element::with_text(name, text));
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Element::text)
    }

    /// Все элементы по относительному пути вида `a/b/c`, в порядке документа.
    pub fn find_all<'a>(&'a self, path: &str) -> Vec<&'a Element> {
        path.split('/')
            .filter(|seg| !seg.is_empty())
            .fold(vec![self], |level, seg| {
                level
                    .into_iter()
                    .flat_map(|el| el.children.iter().filter(move |c| c.name == seg))
                    .collect()
            })
    }

    pub fn find<'a>(&'a self, path: &str) -> Option<&'a Element> {
        self.find_all(path).into_iter().next()
    }

    /* ------------------------------- READ ------------------------------- */

    pub fn parse(xml: &str) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        // открытые, но ещё не закрытые элементы
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => stack.push(Element::new(tag_name(&e)?)),
                Ok(Event::Empty(e)) => attach(&mut stack, &mut root, Element::new(tag_name(&e)?))?,
                Ok(Event::End(_)) => {
                    let el = stack
                        .pop()
                        .ok_or_else(|| ConscriboError::Parse("unexpected closing tag".into()))?;
                    attach(&mut stack, &mut root, el)?;
                }
                Ok(Event::Text(t)) => {
                    let s = t.unescape().map_err(xml_err)?;
                    append_text(&mut stack, &s)?;
                }
                Ok(Event::CData(c)) => {
                    let raw = c.into_inner();
                    let s = std::str::from_utf8(&raw).map_err(xml_err)?;
                    append_text(&mut stack, s)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ConscriboError::Parse(format!(
                        "at position {}: {e}",
                        reader.buffer_position()
                    )))
                }
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ConscriboError::Parse(format!(
                "unexpected end of document, <{}> is not closed",
                open.name
            )));
        }
        root.ok_or_else(|| ConscriboError::Parse("document has no root element".into()))
    }

    /* ------------------------------- WRITE ------------------------------ */

    /// Документ с фиксированной декларацией, без отступов.
    pub fn to_document(&self) -> Result<String> {
        let mut wr = Writer::new(Vec::new());
        wr.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(xml_err)?;
        self.write(&mut wr).map_err(xml_err)?;
        String::from_utf8(wr.into_inner()).map_err(xml_err)
    }

    fn write<W: Write>(&self, wr: &mut Writer<W>) -> std::result::Result<(), quick_xml::Error> {
        if self.text.is_empty() && self.children.is_empty() {
            wr.write_event(Event::Empty(BytesStart::new(self.name.as_str())))?;
            return Ok(());
        }
        wr.write_event(Event::Start(BytesStart::new(self.name.as_str())))?;
        if !self.text.is_empty() {
            wr.write_event(Event::Text(BytesText::new(&self.text)))?;
        }
        for c in &self.children {
            c.write(wr)?;
        }
        wr.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

fn tag_name(e: &BytesStart<'_>) -> Result<String> {
    std::str::from_utf8(e.name().as_ref())
        .map(str::to_owned)
        .map_err(xml_err)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, el: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None if root.is_some() => {
            return Err(ConscriboError::Parse(format!(
                "second root element <{}>",
                el.name
            )))
        }
        None => *root = Some(el),
    }
    Ok(())
}

fn append_text(stack: &mut [Element], s: &str) -> Result<()> {
    match stack.last_mut() {
        Some(el) => {
            el.text.push_str(s);
            Ok(())
        }
        None => Err(ConscriboError::Parse("text outside of root element".into())),
    }
}

fn xml_err<E: std::fmt::Display>(e: E) -> ConscriboError {
    ConscriboError::Parse(e.to_string())
}
