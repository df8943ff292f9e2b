//! XML output sink.
//!
//! The feed is written through a small SAX-style interface so the channel
//! and item code never deal with escaping or indentation.

use anyhow::{Context, Result};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

/// Streaming XML writer interface.
pub trait XmlSink {
    /// Write the `<?xml ...?>` declaration.
    fn start_document(&mut self) -> Result<()>;

    fn start_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()>;

    fn end_element(&mut self, name: &str) -> Result<()>;

    /// Write a complete element: `<name attrs>contents</name>`, or
    /// `<name attrs/>` when there are no contents.
    fn add_quick_element(
        &mut self,
        name: &str,
        contents: Option<&str>,
        attrs: &[(&str, &str)],
    ) -> Result<()>;
}

/// In-memory [`XmlSink`] backed by `quick_xml::Writer`.
pub struct XmlWriter {
    writer: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Indented output, or compact output when `minify` is set.
    pub fn new(minify: bool) -> Self {
        let writer = if minify {
            Writer::new(Vec::new())
        } else {
            Writer::new_with_indent(Vec::new(), b' ', 2)
        };
        Self { writer }
    }

    pub fn into_string(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner()).context("Generated feed contains invalid UTF-8")
    }

    fn start_tag<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
        BytesStart::new(name).with_attributes(attrs.iter().copied())
    }
}

impl XmlSink for XmlWriter {
    fn start_document(&mut self) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .context("Failed to write XML declaration")?;
        Ok(())
    }

    fn start_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.writer
            .write_event(Event::Start(Self::start_tag(name, attrs)))
            .with_context(|| format!("Failed to write <{name}>"))?;
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .with_context(|| format!("Failed to write </{name}>"))?;
        Ok(())
    }

    fn add_quick_element(
        &mut self,
        name: &str,
        contents: Option<&str>,
        attrs: &[(&str, &str)],
    ) -> Result<()> {
        let Some(text) = contents else {
            self.writer
                .write_event(Event::Empty(Self::start_tag(name, attrs)))
                .with_context(|| format!("Failed to write <{name}/>"))?;
            return Ok(());
        };

        self.start_element(name, attrs)?;
        // Written even when empty: keeps `</name>` on the same line when indenting
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .with_context(|| format!("Failed to write <{name}> text"))?;
        self.end_element(name)
    }
}
