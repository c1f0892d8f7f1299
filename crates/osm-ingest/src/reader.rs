//! Streaming element reader.
//!
//! [`ElementReader`] pulls XML events from the underlying source and
//! assembles exactly one top-level element at a time. The element is moved
//! to the caller and the event buffer is reset after every event, so peak
//! memory is bounded by the largest single element rather than the document.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, trace};

use osm_model::{Attributes, Child, Element, ElementKind};

use crate::error::{IngestError, Result};

/// Kinds yielded when no explicit filter is set.
pub const DEFAULT_KINDS: &[ElementKind] = &[ElementKind::Node, ElementKind::Way];

/// Iterator over the top-level elements of an OSM XML document.
pub struct ElementReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    kinds: Vec<ElementKind>,
    current: Option<Element>,
    depth: usize,
    seen: u64,
    skipped: u64,
    finished: bool,
}

/// One XML event reduced to what element assembly needs.
enum Step {
    Open(String, Attributes),
    Leaf(String, Attributes),
    Close,
    Eof,
    Other,
}

impl ElementReader<BufReader<File>> {
    /// Open an OSM file for streaming.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::FileNotFound`] or [`IngestError::FileOpen`].
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileOpen {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        debug!(path = %path.display(), "opened OSM file");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ElementReader<R> {
    pub fn new(inner: R) -> Self {
        let mut reader = Reader::from_reader(inner);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
            kinds: DEFAULT_KINDS.to_vec(),
            current: None,
            depth: 0,
            seen: 0,
            skipped: 0,
            finished: false,
        }
    }

    /// Restrict the yielded elements to the given kinds.
    #[must_use]
    pub fn with_kinds(mut self, kinds: &[ElementKind]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    /// Top-level elements completed so far, yielded or not.
    pub fn elements_seen(&self) -> u64 {
        self.seen
    }

    /// Top-level elements completed but filtered out by kind.
    pub fn elements_skipped(&self) -> u64 {
        self.skipped
    }

    fn advance(&mut self) -> Result<Option<Element>> {
        loop {
            match self.read_step()? {
                Step::Open(name, attributes) => {
                    if let Some(current) = self.current.as_mut() {
                        if self.depth == 1 {
                            current.children.push(Child::new(name, attributes));
                        }
                        self.depth += 1;
                    } else if let Some(kind) = ElementKind::from_tag_name(&name) {
                        self.current = Some(Element::new(kind, attributes));
                        self.depth = 1;
                    }
                }
                Step::Leaf(name, attributes) => {
                    if let Some(current) = self.current.as_mut() {
                        if self.depth == 1 {
                            current.children.push(Child::new(name, attributes));
                        }
                    } else if let Some(kind) = ElementKind::from_tag_name(&name)
                        && let Some(element) = self.accept(Element::new(kind, attributes))
                    {
                        return Ok(Some(element));
                    }
                }
                Step::Close => {
                    if self.current.is_none() {
                        continue;
                    }
                    self.depth -= 1;
                    if self.depth == 0
                        && let Some(element) = self.current.take()
                        && let Some(element) = self.accept(element)
                    {
                        return Ok(Some(element));
                    }
                }
                Step::Eof => {
                    if let Some(element) = self.current.take() {
                        return Err(IngestError::UnexpectedEof {
                            element: element.kind.to_string(),
                            id: element.id_label().to_string(),
                        });
                    }
                    debug!(
                        elements = self.seen,
                        skipped = self.skipped,
                        "reached end of document"
                    );
                    return Ok(None);
                }
                Step::Other => {}
            }
        }
    }

    fn accept(&mut self, element: Element) -> Option<Element> {
        self.seen += 1;
        if self.kinds.contains(&element.kind) {
            trace!(kind = %element.kind, id = element.id_label(), "element complete");
            Some(element)
        } else {
            self.skipped += 1;
            None
        }
    }

    fn read_step(&mut self) -> Result<Step> {
        let decoder = self.reader.decoder();
        let step = match self.reader.read_event_into(&mut self.buf) {
            Ok(Event::Start(start)) => {
                let (name, attributes) =
                    read_start(&start, decoder).map_err(|source| IngestError::Xml {
                        position: self.reader.buffer_position() as u64,
                        source,
                    })?;
                Step::Open(name, attributes)
            }
            Ok(Event::Empty(start)) => {
                let (name, attributes) =
                    read_start(&start, decoder).map_err(|source| IngestError::Xml {
                        position: self.reader.buffer_position() as u64,
                        source,
                    })?;
                Step::Leaf(name, attributes)
            }
            Ok(Event::End(_)) => Step::Close,
            Ok(Event::Eof) => Step::Eof,
            Ok(_) => Step::Other,
            Err(source) => {
                return Err(IngestError::Xml {
                    position: self.reader.error_position() as u64,
                    source,
                });
            }
        };
        self.buf.clear();
        Ok(step)
    }
}

impl<R: BufRead> Iterator for ElementReader<R> {
    type Item = Result<Element>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.advance() {
            Ok(Some(element)) => Some(Ok(element)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

fn read_start(
    start: &BytesStart<'_>,
    decoder: Decoder,
) -> std::result::Result<(String, Attributes), quick_xml::Error> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Attributes::new();
    for attr in start.attributes().with_checks(false) {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.decode_and_unescape_value(decoder)?.into_owned();
        attributes.push(key, value);
    }
    Ok((name, attributes))
}
