use xml_dewey::error::{BuildError, TextPos, XmlError};
use xml_dewey::parse::XmlParser;
use xml_dewey::tree::XmlTree;

/// (label, dewey id) per node in completion order
fn completed(tree: &XmlTree) -> Vec<(String, String)> {
    tree.completion_order()
        .map(|node| (node.label().to_string(), node.dewey_id().to_string()))
        .collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected.iter().map(|(l, d)| (l.to_string(), d.to_string())).collect()
}

#[test]
pub fn test_root_only() {
    let tree = XmlParser::default().parse("<a/>").unwrap();
    assert_eq!(1, tree.len());
    let root = tree.root().unwrap();
    assert_eq!("a", root.label());
    assert_eq!("1", root.dewey_id().to_string());
    assert_eq!(None, root.text());
    assert!(root.children().is_empty());
}

#[test]
pub fn test_child_list() {
    let tree = XmlParser::default().parse("<a><b/><c/></a>").unwrap();
    assert_eq!(pairs(&[("b", "1.1"), ("c", "1.2"), ("a", "1")]), completed(&tree));
}

#[test]
pub fn test_nested_structure() {
    let xml = "<root><a><b></b><c><d></d></c></a><e></e></root>";
    let tree = XmlParser::default().parse(xml).unwrap();
    assert_eq!(
        pairs(&[
            ("b", "1.1.1"),
            ("d", "1.1.2.1"),
            ("c", "1.1.2"),
            ("a", "1.1"),
            ("e", "1.2"),
            ("root", "1"),
        ]),
        completed(&tree)
    );

    let c = tree.find(&"1.1.2".parse().unwrap()).unwrap();
    assert_eq!("c", c.label());
    assert_eq!("a", tree.parent(c.id()).unwrap().label());
    let children: Vec<&str> = tree.children(c.id()).map(|n| n.label()).collect();
    assert_eq!(vec!["d"], children);
}

#[test]
pub fn test_document_order() {
    let xml = "<root><a><b/></a><c/></root>";
    let tree = XmlParser::default().parse(xml).unwrap();
    let labels: Vec<&str> = tree.nodes().iter().map(|n| n.label()).collect();
    assert_eq!(vec!["root", "a", "b", "c"], labels);
}

#[test]
pub fn test_random_spaces() {
    let xml = "<root     \t\r\t \n   ><a    \t\r\t   /><b  \t  \n><c   \t\r\t /></b \n\n ></root  \n\n     \t\r\t  >";
    let tree = XmlParser::default().parse(xml).unwrap();
    assert_eq!(pairs(&[("a", "1.1"), ("c", "1.2.1"), ("b", "1.2"), ("root", "1")]), completed(&tree));
}

#[test]
pub fn test_prolog_and_misc() {
    let xml = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- head -->\n<?pi data?>\n<root><!-- inner --><a/></root>\n<!-- tail -->\n";
    let tree = XmlParser::default().parse(xml).unwrap();
    assert_eq!(pairs(&[("a", "1.1"), ("root", "1")]), completed(&tree));
}

#[test]
pub fn test_case_preserved() {
    let tree = XmlParser::default().parse("<Bib><Paper/></Bib>").unwrap();
    assert_eq!(pairs(&[("Paper", "1.1"), ("Bib", "1")]), completed(&tree));
}

#[test]
pub fn test_prefixed_names() {
    let tree = XmlParser::default().parse("<x:root><x:a/></x:root>").unwrap();
    assert_eq!(pairs(&[("x:a", "1.1"), ("x:root", "1")]), completed(&tree));
}

#[test]
pub fn test_empty_document() {
    for xml in ["", "   \n", "<?xml version=\"1.0\"?>", "<!-- nothing -->"] {
        let tree = XmlParser::default().parse(xml).unwrap();
        assert!(tree.is_empty(), "{:?}", xml);
        assert_eq!(0, tree.completion_order().count());
    }
}

#[test]
pub fn test_many_siblings() {
    let xml = format!("<root>{}</root>", "<a/>".repeat(12));
    let tree = XmlParser::default().parse(&xml).unwrap();
    let root = tree.root().unwrap();
    let ordinals: Vec<u32> = tree.children(root.id()).map(|n| n.dewey_id().ordinal()).collect();
    assert_eq!((1..=12).collect::<Vec<u32>>(), ordinals);
    assert_eq!("1.12", tree.find(&"1.12".parse().unwrap()).unwrap().dewey_id().to_string());
    assert!(tree.find(&"1.13".parse().unwrap()).is_none());
}

#[test]
pub fn test_non_matching_tags() {
    let xml = "<root><a></b></root>";
    let err = XmlParser::default().parse(xml).unwrap_err();
    assert_eq!(
        Some(&BuildError::NonMatchingTags { expected: "a".to_string(), found: "b".to_string() }),
        err.build_error()
    );
    assert_eq!(Some(TextPos::new(1, 10)), err.position());
}

#[test]
pub fn test_unclosed_element() {
    let err = XmlParser::default().parse("<root><a></a>").unwrap_err();
    // either the tokenizer or the builder notices the missing end tag
    assert!(
        matches!(err, XmlError::Unclosed(BuildError::UnclosedElements(_)) | XmlError::Syntax(_)),
        "{:?}", err
    );
}

#[test]
pub fn test_multiple_roots() {
    assert!(XmlParser::default().parse("<one/><two/>").is_err());
    assert!(XmlParser::default().parse("<one></one><two></two>").is_err());
}

#[test]
pub fn test_missing_open_tag() {
    assert!(XmlParser::default().parse("</close>").is_err());
}
