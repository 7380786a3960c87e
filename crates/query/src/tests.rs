use super::*;
use docset::DocSet;

struct MapResolver(Vec<(&'static str, Vec<usize>)>);

impl Resolver<128> for MapResolver {
    fn resolve(&self, word: &str) -> DocSet<128> {
        let mut set = DocSet::new();
        if let Some((_, ids)) = self.0.iter().find(|(w, _)| *w == word) {
            for &id in ids {
                set.add(id).unwrap();
            }
        }
        set
    }
}

#[test]
fn empty_and_is_universe() {
    let resolver = MapResolver(vec![]);
    let node = Node::And(vec![]);
    let result = node.eval(&resolver);
    assert_eq!(result.ids(), (0..128).collect::<Vec<_>>());
}

#[test]
fn empty_or_is_empty() {
    let resolver = MapResolver(vec![]);
    let node = Node::Or(vec![]);
    let result = node.eval(&resolver);
    assert!(result.ids().is_empty());
}

#[test]
fn and_intersects_children() {
    let resolver = MapResolver(vec![("a", vec![1, 2, 3]), ("b", vec![2, 3, 4])]);
    let node = and(["a", "b"]);
    assert_eq!(node.eval(&resolver).ids(), vec![2, 3]);
}

#[test]
fn or_unions_children() {
    let resolver = MapResolver(vec![("a", vec![1, 2]), ("b", vec![2, 3])]);
    let node = or(["a", "b"]);
    assert_eq!(node.eval(&resolver).ids(), vec![1, 2, 3]);
}

#[test]
fn none_children_are_skipped() {
    let resolver = MapResolver(vec![("a", vec![1])]);
    let node = Node::And(vec![None, Some(Node::lit("a")), None]);
    assert_eq!(node.eval(&resolver).ids(), vec![1]);
}

#[test]
fn nested_and_or() {
    let resolver = MapResolver(vec![
        ("russia", vec![0, 1, 2, 3]),
        ("putin", vec![1]),
        ("podnebesny", vec![0]),
    ]);
    let node = Node::And(vec![
        Some(Node::lit("russia")),
        Some(Node::Or(vec![
            Some(Node::lit("putin")),
            Some(Node::lit("podnebesny")),
        ])),
    ]);
    assert_eq!(node.eval(&resolver).ids(), vec![0, 1]);
}
