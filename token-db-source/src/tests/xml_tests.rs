use super::*;

const SAMPLE_TOKENS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cockatrice_carddatabase version="4">
    <sets>
        <set>
            <name>TM19</name>
            <longname>Core Set 2019 Tokens</longname>
        </set>
    </sets>
    <cards>
        <card>
            <name>Angel Token</name>
            <text>Flying</text>
            <prop>
                <colors>W</colors>
                <type>Token Creature — Angel</type>
                <maintype>Creature</maintype>
                <pt>4/4</pt>
            </prop>
            <set picURL="https://example.com/angel-m19.jpg">TM19</set>
            <set picURL="https://example.com/angel-dom.jpg">TDOM</set>
            <reverse-related>Resplendent Angel</reverse-related>
            <reverse-related count="2">Lyra Dawnbringer</reverse-related>
            <token>1</token>
            <tablerow>2</tablerow>
        </card>
        <card>
            <name>Llanowar Elves</name>
            <text>{T}: Add {G}.</text>
            <prop>
                <type>Creature — Elf Druid</type>
                <pt>1/1</pt>
            </prop>
            <token>0</token>
        </card>
        <card>
            <name>Treasure</name>
            <text>{T}, Sacrifice this artifact: Add one mana of any color.</text>
            <prop>
                <type>Token Artifact — Treasure</type>
            </prop>
            <token>1</token>
        </card>
    </cards>
</cockatrice_carddatabase>"#;

#[test]
fn test_parse_sample_tokens() {
    let tokens = parse_tokens_str(SAMPLE_TOKENS_XML).unwrap();
    assert_eq!(tokens.len(), 2);

    let angel = &tokens[0];
    assert_eq!(angel.name, "Angel Token");
    assert_eq!(angel.type_line, "Token Creature — Angel");
    assert_eq!(angel.abilities, "Flying");
    assert_eq!(angel.pt, "4/4");
    assert_eq!(angel.colors, "W");
    assert_eq!(
        angel.reverse_related,
        vec!["Resplendent Angel", "Lyra Dawnbringer"]
    );
    assert_eq!(
        angel.artwork,
        vec![
            ArtworkEntry::new("TM19", "https://example.com/angel-m19.jpg"),
            ArtworkEntry::new("TDOM", "https://example.com/angel-dom.jpg"),
        ]
    );

    let treasure = &tokens[1];
    assert_eq!(treasure.name, "Treasure");
    assert_eq!(treasure.pt, "");
    assert_eq!(treasure.colors, "");
    assert!(treasure.reverse_related.is_empty());
    assert!(treasure.artwork.is_empty());
}

#[test]
fn test_missing_cards_element_is_empty() {
    let xml = r#"<?xml version="1.0"?><cockatrice_carddatabase version="4"><sets/></cockatrice_carddatabase>"#;
    let tokens = parse_tokens_str(xml).unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn test_empty_cards_element() {
    let xml = r#"<db><cards/></db>"#;
    assert!(parse_tokens_str(xml).unwrap().is_empty());
}

#[test]
fn test_token_marker_must_be_exactly_one() {
    let xml = r#"<db><cards>
        <card><name>A</name><token>1</token></card>
        <card><name>B</name><token>true</token></card>
        <card><name>C</name><token/></card>
        <card><name>D</name></card>
    </cards></db>"#;
    let tokens = parse_tokens_str(xml).unwrap();
    let names: Vec<_> = tokens.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["A"]);
}

#[test]
fn test_blank_or_missing_name_skipped() {
    let xml = r#"<db><cards>
        <card><name>   </name><token>1</token></card>
        <card><name/><token>1</token></card>
        <card><text>Flying</text><token>1</token></card>
        <card><name> Spirit </name><token>1</token></card>
    </cards></db>"#;
    let tokens = parse_tokens_str(xml).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].name, "Spirit");
}

#[test]
fn test_missing_prop_defaults() {
    let xml = r#"<db><cards><card><name>Clue</name><token>1</token></card></cards></db>"#;
    let tokens = parse_tokens_str(xml).unwrap();
    assert_eq!(tokens[0].type_line, "Token");
    assert_eq!(tokens[0].pt, "");
    assert_eq!(tokens[0].colors, "");
    assert_eq!(tokens[0].abilities, "");
}

#[test]
fn test_empty_type_uses_sentinel() {
    let xml = r#"<db><cards><card>
        <name>Blood</name>
        <prop><type>  </type></prop>
        <token>1</token>
    </card></cards></db>"#;
    let tokens = parse_tokens_str(xml).unwrap();
    assert_eq!(tokens[0].type_line, "Token");
}

#[test]
fn test_first_occurrence_wins_for_single_fields() {
    let xml = r#"<db><cards><card>
        <name>Zombie</name>
        <name>Ignored</name>
        <prop><pt>2/2</pt><pt>9/9</pt></prop>
        <prop><colors>R</colors></prop>
        <token>1</token>
    </card></cards></db>"#;
    let tokens = parse_tokens_str(xml).unwrap();
    assert_eq!(tokens[0].name, "Zombie");
    assert_eq!(tokens[0].pt, "2/2");
    // Only the first <prop> is consulted.
    assert_eq!(tokens[0].colors, "");
}

#[test]
fn test_artwork_requires_url_and_set() {
    let xml = r#"<db><cards><card>
        <name>Soldier</name>
        <set>TM20</set>
        <set picURL="https://example.com/no-set.jpg"/>
        <set picURL="">TM21</set>
        <set picURL="https://example.com/soldier.jpg" num="3">TKHM</set>
        <token>1</token>
    </card></cards></db>"#;
    let tokens = parse_tokens_str(xml).unwrap();
    assert_eq!(
        tokens[0].artwork,
        vec![ArtworkEntry::new("TKHM", "https://example.com/soldier.jpg")]
    );
}

#[test]
fn test_reverse_related_keeps_duplicates_and_skips_blank() {
    let xml = r#"<db><cards><card>
        <name>Goblin</name>
        <reverse-related>Krenko, Mob Boss</reverse-related>
        <reverse-related>Krenko, Mob Boss</reverse-related>
        <reverse-related>  </reverse-related>
        <reverse-related/>
        <token>1</token>
    </card></cards></db>"#;
    let tokens = parse_tokens_str(xml).unwrap();
    assert_eq!(
        tokens[0].reverse_related,
        vec!["Krenko, Mob Boss", "Krenko, Mob Boss"]
    );
}

#[test]
fn test_entities_and_cdata_decoded() {
    let xml = r#"<db><cards><card>
        <name>Rock &amp; Roll</name>
        <text><![CDATA[When this dies, draw a card.]]></text>
        <set picURL="https://example.com/a.jpg?x=1&amp;y=2">TSET</set>
        <token>1</token>
    </card></cards></db>"#;
    let tokens = parse_tokens_str(xml).unwrap();
    assert_eq!(tokens[0].name, "Rock & Roll");
    assert_eq!(tokens[0].abilities, "When this dies, draw a card.");
    assert_eq!(tokens[0].artwork[0].url, "https://example.com/a.jpg?x=1&y=2");
}

#[test]
fn test_only_direct_card_children_are_read() {
    let xml = r#"<db><cards><card>
        <name>Thopter</name>
        <related><name>Not Me</name></related>
        <token>1</token>
    </card></cards></db>"#;
    let tokens = parse_tokens_str(xml).unwrap();
    assert_eq!(tokens[0].name, "Thopter");
}

#[test]
fn test_mismatched_tags_are_fatal() {
    let xml = r#"<db><cards><card><name>Bad</card></cards></db>"#;
    assert!(parse_tokens_str(xml).is_err());
}

#[test]
fn test_truncated_document_is_fatal() {
    let xml = r#"<db><cards><card><name>Cut</name>"#;
    let err = parse_tokens_str(xml).unwrap_err();
    assert!(matches!(err, SourceError::InvalidXml(_)));
}

#[test]
fn test_empty_document_is_fatal() {
    assert!(parse_tokens_str("").is_err());
    assert!(parse_tokens_str("not xml at all").is_err());
}

#[test]
fn test_content_after_root_is_fatal() {
    let trailing_text =
        r#"<db><cards><card><name>A</name><token>1</token></card></cards></db>trailing junk"#;
    let err = parse_tokens_str(trailing_text).unwrap_err();
    assert!(matches!(err, SourceError::InvalidXml(_)));

    let second_root = r#"<db><cards/></db><db2/>"#;
    let err = parse_tokens_str(second_root).unwrap_err();
    assert!(matches!(err, SourceError::InvalidXml(_)));

    let second_open_root = r#"<db><cards/></db><db2></db2>"#;
    assert!(parse_tokens_str(second_open_root).is_err());
}

#[test]
fn test_whitespace_around_root_is_allowed() {
    let xml = "\n  <db><cards><card><name>A</name><token>1</token></card></cards></db>\n\n";
    assert_eq!(parse_tokens_str(xml).unwrap().len(), 1);
}

#[test]
fn test_text_before_root_is_fatal() {
    let err = parse_tokens_str("junk<db><cards/></db>").unwrap_err();
    assert!(matches!(err, SourceError::InvalidXml(_)));
}
