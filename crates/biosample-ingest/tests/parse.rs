use std::fs;

use biosample_ingest::{IngestError, parse_biosample_file, parse_biosample_set};

const SAMPLE_SET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<BioSampleSet>
  <BioSample access="public" publication_date="2014-07-01T00:00:00.000" last_update="2015-02-10T10:22:48.523"
      submission_date="2014-06-30T11:04:12.160" id="2841321" accession="SAMN02841321">
    <Ids>
      <Id db="BioSample" is_primary="1">SAMN02841321</Id>
    </Ids>
    <Description>
      <Title>Soil metagenome from Maryland</Title>
      <Organism taxonomy_id="410658" taxonomy_name="soil metagenome">
        <OrganismName>soil metagenome</OrganismName>
      </Organism>
    </Description>
    <Owner>
      <Name>University of Maryland</Name>
    </Owner>
    <Models>
      <Model>Metagenome or environmental</Model>
    </Models>
    <Package display_name="Metagenome or environmental; version 1.0">Metagenome.environmental.1.0</Package>
    <Attributes>
      <Attribute attribute_name="collection_date" harmonized_name="collection_date" display_name="collection date">2014-06-01</Attribute>
      <Attribute attribute_name="geographic location" harmonized_name="geo_loc_name" display_name="geographic location">USA: Maryland</Attribute>
      <Attribute attribute_name="lat_lon" harmonized_name="lat_lon" display_name="latitude and longitude">38.98 N 77.11 W</Attribute>
      <Attribute attribute_name="depth">10 cm</Attribute>
      <Attribute attribute_name="host" harmonized_name="host" display_name="host"/>
    </Attributes>
    <Links>
      <Link type="entrez" target="bioproject" label="PRJNA253680">253680</Link>
    </Links>
    <Status status="live" when="2014-07-01T11:04:12.163"/>
  </BioSample>
  <BioSample id="2841322" accession="SAMN02841322">
    <Package display_name="Generic">Generic.1.0</Package>
  </BioSample>
</BioSampleSet>
"#;

#[test]
fn extracts_record_fields() {
    let records = parse_biosample_set(SAMPLE_SET.as_bytes()).expect("parse sample set");
    assert_eq!(records.len(), 2);

    let record = &records[0];
    assert_eq!(record.id, "2841321");
    assert_eq!(record.accession, "SAMN02841321");
    assert_eq!(record.access, "public");
    assert_eq!(record.publication_date, "2014-07-01T00:00:00.000");
    assert_eq!(record.last_update, "2015-02-10T10:22:48.523");
    assert_eq!(record.submission_date, "2014-06-30T11:04:12.160");
    assert_eq!(record.organism_taxonomy_id, "410658");
    assert_eq!(record.organism_taxonomy_name, "soil metagenome");
    assert_eq!(record.organism_name, "soil metagenome");
    assert_eq!(record.owner_name, "University of Maryland");
    assert_eq!(record.model_name, "Metagenome or environmental");
    assert_eq!(
        record.package_display_name,
        "Metagenome or environmental; version 1.0"
    );
    assert_eq!(record.package_name, "Metagenome.environmental.1.0");
    assert_eq!(record.status, "live");
    assert_eq!(record.status_date, "2014-07-01T11:04:12.163");

    assert_eq!(record.links.len(), 1);
    assert_eq!(record.links[0].link_type, "entrez");
    assert_eq!(record.links[0].target, "bioproject");
    assert_eq!(record.links[0].label, "PRJNA253680");
    assert_eq!(record.links[0].value, "253680");
}

#[test]
fn keeps_only_fully_named_attributes() {
    let records = parse_biosample_set(SAMPLE_SET.as_bytes()).expect("parse sample set");
    let record = &records[0];

    let names: Vec<_> = record.attributes.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["collection_date", "geo_loc_name", "host", "lat_lon"]);

    let geo = record.attribute("geo_loc_name").expect("geo_loc_name");
    assert_eq!(geo.submitted_name, "geographic location");
    assert_eq!(geo.display_name, "geographic location");
    assert_eq!(geo.value, "USA: Maryland");

    let host = record.attribute("host").expect("host");
    assert!(!host.is_filled_in());
}

#[test]
fn second_record_has_defaults() {
    let records = parse_biosample_set(SAMPLE_SET.as_bytes()).expect("parse sample set");
    let record = &records[1];
    assert_eq!(record.id, "2841322");
    assert_eq!(record.package_name, "Generic.1.0");
    assert!(record.attributes.is_empty());
    assert!(record.owner_name.is_empty());
}

#[test]
fn reads_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("biosample_set.xml");
    fs::write(&path, SAMPLE_SET).expect("write xml");
    let records = parse_biosample_file(&path).expect("parse file");
    assert_eq!(records.len(), 2);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = parse_biosample_file(&dir.path().join("absent.xml")).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
}

#[test]
fn malformed_xml_is_reported() {
    let xml = "<BioSampleSet><BioSample id=\"1\"></Package></BioSampleSet>";
    let err = parse_biosample_set(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, IngestError::Xml { .. }), "got {err}");
}

#[test]
fn empty_set_has_no_records() {
    let records = parse_biosample_set("<BioSampleSet/>".as_bytes()).expect("parse");
    assert!(records.is_empty());
}
