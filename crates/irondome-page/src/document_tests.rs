use super::*;

fn sample() -> (Document, NodeId, NodeId, NodeId) {
    let mut doc = Document::new();
    let body = doc.body();
    let main = doc.append_spec(body, ElementSpec::new("div").id("mainContainer"));
    let list = doc.append_spec(
        main,
        ElementSpec::new("div")
            .class("buttons-list")
            .child(ElementSpec::new("a").text("Attack")),
    );
    let info = doc.append_spec(main, ElementSpec::new("div").class("user-information"));
    (doc, main, list, info)
}

#[test]
fn test_new_document_has_body() {
    let doc = Document::new();
    let body = doc.element(doc.body()).unwrap();
    assert_eq!(body.tag_name, "body");
    assert_eq!(body.parent(), Some(doc.root()));
}

#[test]
fn test_append_spec_builds_subtree() {
    let (doc, main, list, info) = sample();
    assert_eq!(doc.element(main).unwrap().children(), &[list, info]);
    assert_eq!(doc.text_content(list), "Attack");
}

#[test]
fn test_insert_after_places_next_sibling() {
    let (mut doc, main, list, info) = sample();
    let banner = doc.create_element("img");
    assert!(doc.insert_after(list, banner));
    assert_eq!(doc.element(main).unwrap().children(), &[list, banner, info]);

    let badge = doc.create_element("div");
    assert!(doc.insert_after(info, badge));
    assert_eq!(doc.element(main).unwrap().children(), &[list, banner, info, badge]);
}

#[test]
fn test_insert_after_detached_reference_fails() {
    let (mut doc, ..) = sample();
    let floating = doc.create_element("div");
    let node = doc.create_element("img");
    assert!(!doc.insert_after(floating, node));
}

#[test]
fn test_append_moves_existing_node() {
    let (mut doc, main, list, info) = sample();
    assert!(doc.append_child(info, list));
    assert_eq!(doc.element(main).unwrap().children(), &[info]);
    assert_eq!(doc.element(list).unwrap().parent(), Some(info));
}

#[test]
fn test_append_rejects_cycles() {
    let (mut doc, main, list, _) = sample();
    assert!(!doc.append_child(list, main));
    assert!(!doc.append_child(main, main));
}

#[test]
fn test_remove_frees_subtree() {
    let (mut doc, main, list, info) = sample();
    let link = doc.element(list).unwrap().children()[0];

    assert!(doc.remove(list));
    assert!(doc.element(list).is_none());
    assert!(doc.element(link).is_none());
    assert_eq!(doc.element(main).unwrap().children(), &[info]);
    assert!(!doc.remove(list));
}

#[test]
fn test_root_cannot_be_removed() {
    let mut doc = Document::new();
    let root = doc.root();
    assert!(!doc.remove(root));
}

#[test]
fn test_descendants_in_document_order() {
    let (doc, main, list, info) = sample();
    let link = doc.element(list).unwrap().children()[0];
    assert_eq!(doc.descendants(main), vec![list, link, info]);
}

#[test]
fn test_queries() {
    let (doc, main, list, _) = sample();
    assert_eq!(doc.get_element_by_id("mainContainer"), Some(main));
    assert_eq!(doc.query_selector(&ElementMatcher::class("buttons-list")), Some(list));
    assert_eq!(doc.query_selector(&ElementMatcher::tag("html")), Some(doc.root()));
    assert_eq!(doc.query_selector_all(&ElementMatcher::tag("div")).len(), 3);
    assert!(doc.get_element_by_id("missing").is_none());
}

#[test]
fn test_detached_elements_are_not_queried() {
    let mut doc = Document::new();
    let floating = doc.create_element("div");
    doc.set_attribute(floating, "id", "ghost");
    assert!(doc.get_element_by_id("ghost").is_none());
}

#[test]
fn test_removed_slots_are_reused() {
    let mut doc = Document::new();
    let body = doc.body();
    let first = doc.append_spec(body, ElementSpec::new("div").child(ElementSpec::new("span")));
    let capacity = doc.capacity();

    assert!(doc.remove(first));
    let second = doc.append_spec(body, ElementSpec::new("div").child(ElementSpec::new("span")));

    assert_eq!(doc.capacity(), capacity);
    assert!(doc.element(second).is_some());
}

#[test]
fn test_stale_id_does_not_resolve_to_new_occupant() {
    let mut doc = Document::new();
    let body = doc.body();
    let old = doc.append_spec(body, ElementSpec::new("img").id("old"));
    assert!(doc.remove(old));

    let new = doc.append_spec(body, ElementSpec::new("div").id("new"));
    assert_ne!(old, new);
    assert!(doc.element(old).is_none());
    assert!(!doc.remove(old));
    assert_eq!(doc.element(new).unwrap().id(), Some("new"));
}
