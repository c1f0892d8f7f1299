//! Tests for the streaming element reader.

use std::io::{Cursor, Write};

use osm_ingest::{ElementReader, IngestError};
use osm_model::{Element, ElementKind};

const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="test">
  <bounds minlat="29.9" minlon="-90.1" maxlat="30.0" maxlon="-90.0"/>
  <node id="1" lat="29.95" lon="-90.07" user="alice" uid="10" version="2" changeset="100" timestamp="2015-01-01T00:00:00Z"/>
  <node id="2" lat="29.96" lon="-90.08" user="bob" uid="11" version="1" changeset="101" timestamp="2015-01-02T00:00:00Z">
    <tag k="addr:street" v="Magazine St"/>
    <tag k="name" v="Caf&#233; &amp; Bar"/>
  </node>
  <way id="50" user="alice" uid="10" version="3" changeset="102" timestamp="2015-01-03T00:00:00Z">
    <nd ref="2"/>
    <tag k="highway" v="residential"/>
    <nd ref="1"/>
  </way>
  <relation id="900" user="carol" uid="12" version="1" changeset="103" timestamp="2015-01-04T00:00:00Z">
    <member type="way" ref="50" role="outer"/>
    <tag k="type" v="multipolygon"/>
  </relation>
</osm>
"#;

fn read_all(reader: ElementReader<Cursor<&[u8]>>) -> Vec<Element> {
    reader
        .collect::<Result<Vec<_>, _>>()
        .expect("read elements")
}

#[test]
fn yields_nodes_and_ways_by_default() {
    let mut reader = ElementReader::new(Cursor::new(SAMPLE.as_bytes()));
    let elements: Vec<Element> = reader.by_ref().collect::<Result<_, _>>().unwrap();

    let kinds: Vec<ElementKind> = elements.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![ElementKind::Node, ElementKind::Node, ElementKind::Way]
    );
    assert_eq!(reader.elements_seen(), 4);
    assert_eq!(reader.elements_skipped(), 1);
}

#[test]
fn self_closing_node_has_attributes_and_no_children() {
    let elements = read_all(ElementReader::new(Cursor::new(SAMPLE.as_bytes())));
    let first = &elements[0];
    assert_eq!(first.attribute("id"), Some("1"));
    assert_eq!(first.attribute("user"), Some("alice"));
    assert!(first.children.is_empty());
}

#[test]
fn children_keep_document_order_and_unescape_values() {
    let elements = read_all(ElementReader::new(Cursor::new(SAMPLE.as_bytes())));
    let node = &elements[1];
    let tags: Vec<(&str, &str)> = node
        .tags()
        .map(|tag| {
            (
                tag.attributes.get("k").unwrap(),
                tag.attributes.get("v").unwrap(),
            )
        })
        .collect();
    assert_eq!(
        tags,
        vec![("addr:street", "Magazine St"), ("name", "Café & Bar")]
    );

    let way = &elements[2];
    let names: Vec<&str> = way.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["nd", "tag", "nd"]);
    let refs: Vec<&str> = way
        .node_refs()
        .map(|nd| nd.attributes.get("ref").unwrap())
        .collect();
    assert_eq!(refs, vec!["2", "1"]);
}

#[test]
fn kind_filter_includes_relations() {
    let elements = read_all(
        ElementReader::new(Cursor::new(SAMPLE.as_bytes())).with_kinds(&ElementKind::ALL),
    );
    assert_eq!(elements.len(), 4);
    let relation = &elements[3];
    assert_eq!(relation.kind, ElementKind::Relation);
    assert_eq!(relation.children.len(), 2);
    assert_eq!(relation.tags().count(), 1);
}

#[test]
fn truncated_document_is_an_error() {
    let xml = r#"<osm><way id="7" user="u"><nd ref="1"/>"#;
    let results: Vec<_> = ElementReader::new(Cursor::new(xml.as_bytes())).collect();
    assert_eq!(results.len(), 1);
    assert!(results[0].is_err());
}

#[test]
fn mismatched_end_tag_stops_iteration() {
    let xml = r#"<osm><node id="1" lat="0" lon="0"></way><node id="2"/></osm>"#;
    let mut reader = ElementReader::new(Cursor::new(xml.as_bytes()));
    let first = reader.next().expect("an item");
    assert!(matches!(first, Err(IngestError::Xml { .. })));
    assert!(reader.next().is_none());
}

#[test]
fn open_missing_file_reports_path() {
    let err = ElementReader::open(std::path::Path::new("/nonexistent/map.osm"))
        .err()
        .expect("missing file");
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn open_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    let count = ElementReader::open(file.path())
        .unwrap()
        .filter_map(Result::ok)
        .count();
    assert_eq!(count, 3);
}
