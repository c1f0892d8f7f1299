use std::fs;

use osm_model::{
    NodeRecord, ShapedElement, ShapedNode, ShapedWay, TagRecord, WayNodeRecord, WayRecord,
};
use osm_output::{CsvSinks, OutputFiles, RecordSink, Sinks};

fn tag(id: &str, key: &str, value: &str, tag_type: &str) -> TagRecord {
    TagRecord {
        id: id.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        tag_type: tag_type.to_string(),
    }
}

fn node() -> ShapedNode {
    ShapedNode {
        node: NodeRecord {
            id: "757860928".to_string(),
            lat: "41.9747374".to_string(),
            lon: "-87.6920102".to_string(),
            user: "uboot".to_string(),
            uid: "26299".to_string(),
            version: "2".to_string(),
            changeset: "5288876".to_string(),
            timestamp: "2010-07-22T16:16:51Z".to_string(),
        },
        node_tags: vec![
            tag("757860928", "amenity", "fast_food", "regular"),
            tag("757860928", "street", "West Lexington Street", "addr"),
        ],
    }
}

fn way() -> ShapedWay {
    let nd = |node_id: &str, position| WayNodeRecord {
        id: "209809850".to_string(),
        node_id: node_id.to_string(),
        position,
    };
    ShapedWay {
        way: WayRecord {
            id: "209809850".to_string(),
            user: "chicago-buildings".to_string(),
            uid: "674454".to_string(),
            version: "1".to_string(),
            changeset: "15353317".to_string(),
            timestamp: "2013-03-13T15:58:04Z".to_string(),
        },
        way_nodes: vec![nd("2199822281", 0), nd("2199822390", 1)],
        way_tags: vec![tag("209809850", "name", "Lake Shore, Drive", "regular")],
    }
}

#[test]
fn rows_follow_headers_in_column_order() {
    let mut sinks = CsvSinks::new(Sinks::<Vec<u8>>::default()).unwrap();
    sinks.write(&ShapedElement::Node(node())).unwrap();
    sinks.write(&ShapedElement::Way(way())).unwrap();

    let counts = *sinks.counts();
    assert_eq!(
        counts,
        Sinks {
            nodes: 1,
            node_tags: 2,
            ways: 1,
            way_nodes: 2,
            way_tags: 1,
        }
    );
    assert_eq!(counts.total(), 7);

    let inner = sinks.into_inner().unwrap();
    let text = |bytes: Vec<u8>| String::from_utf8(bytes).unwrap();
    insta::assert_snapshot!(text(inner.nodes), @r"
    id,lat,lon,user,uid,version,changeset,timestamp
    757860928,41.9747374,-87.6920102,uboot,26299,2,5288876,2010-07-22T16:16:51Z
    ");
    insta::assert_snapshot!(text(inner.node_tags), @r"
    id,key,value,type
    757860928,amenity,fast_food,regular
    757860928,street,West Lexington Street,addr
    ");
    insta::assert_snapshot!(text(inner.ways), @r"
    id,user,uid,version,changeset,timestamp
    209809850,chicago-buildings,674454,1,15353317,2013-03-13T15:58:04Z
    ");
    insta::assert_snapshot!(text(inner.way_nodes), @r"
    id,node_id,position
    209809850,2199822281,0
    209809850,2199822390,1
    ");
    insta::assert_snapshot!(text(inner.way_tags), @r#"
    id,key,value,type
    209809850,name,"Lake Shore, Drive",regular
    "#);
}

#[test]
fn files_are_created_under_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("csv");
    let files: OutputFiles = toml::from_str(r#"way_tags = "tags_of_ways.csv""#).unwrap();

    let mut sinks = CsvSinks::create(&out, &files).unwrap();
    sinks.write_way(&way()).unwrap();
    sinks.flush().unwrap();
    drop(sinks);

    let way_tags = fs::read_to_string(out.join("tags_of_ways.csv")).unwrap();
    assert_eq!(
        way_tags,
        "id,key,value,type\n209809850,name,\"Lake Shore, Drive\",regular\n"
    );
    let nodes = fs::read_to_string(out.join("nodes.csv")).unwrap();
    assert_eq!(nodes, "id,lat,lon,user,uid,version,changeset,timestamp\n");
    assert!(out.join("ways_nodes.csv").exists());
}
