//! Property tests for merge and navigation laws.

use lsd_tree::{Level, Lsd, Navigate, PathSegment, parse_str};
use quickcheck::{Arbitrary, Gen};

const KEY_CHARS: &[char] = &['a', 'b', 'c', 'd', 'x', 'y', 'z'];

fn word(g: &mut Gen) -> String {
    let len = 1 + usize::arbitrary(g) % 5;
    (0..len)
        .map(|_| *g.choose(KEY_CHARS).unwrap())
        .collect()
}

/// A batch of level entries whose key paths share no root, rendered and
/// parsed as a document.
#[derive(Debug, Clone)]
struct DisjointEntries(Vec<(Vec<String>, String)>);

impl Arbitrary for DisjointEntries {
    fn arbitrary(g: &mut Gen) -> Self {
        let count = usize::arbitrary(g) % 5;
        let entries = (0..count)
            .map(|i| {
                // a unique root per entry keeps the paths disjoint
                let mut parts = vec![format!("{}{i}", word(g))];
                for _ in 0..usize::arbitrary(g) % 3 {
                    parts.push(word(g));
                }
                (parts, word(g))
            })
            .collect();
        Self(entries)
    }
}

fn render(entries: &[(Vec<String>, String)]) -> String {
    entries
        .iter()
        .map(|(parts, value)| format!("{} {value}\n", parts.join(".")))
        .collect()
}

#[test]
fn disjoint_entries_merge_order_independently() {
    fn prop(entries: DisjointEntries) -> bool {
        let forward = parse_str(&render(&entries.0)).unwrap();
        let mut reversed = entries.0.clone();
        reversed.reverse();
        let backward = parse_str(&render(&reversed)).unwrap();

        let forward = forward.as_level().unwrap();
        let backward = backward.as_level().unwrap();

        forward.len() == backward.len()
            && forward.iter().all(|(key, node)| backward.get(key) == Some(node))
    }

    quickcheck::quickcheck(prop as fn(DisjointEntries) -> bool);
}

/// A small arbitrary tree, built directly rather than parsed.
#[derive(Debug, Clone)]
struct ArbTree(Lsd);

impl Arbitrary for ArbTree {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_node(g: &mut Gen, depth: usize) -> Lsd {
            if depth == 0 {
                return Lsd::Value(word(g));
            }
            match usize::arbitrary(g) % 3 {
                0 => Lsd::Value(word(g)),
                1 => {
                    let len = usize::arbitrary(g) % 3;
                    Lsd::List((0..len).map(|_| gen_node(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 3;
                    let mut level = Level::new();
                    for i in 0..len {
                        level.insert(format!("{}{i}", word(g)), gen_node(g, depth - 1));
                    }
                    Lsd::Level(level)
                }
            }
        }

        let depth = 1 + usize::arbitrary(g) % 3;
        let len = usize::arbitrary(g) % 4;
        let mut root = Level::new();
        for i in 0..len {
            root.insert(format!("{}{i}", word(g)), gen_node(g, depth - 1));
        }
        Self(Lsd::Level(root))
    }
}

fn walk<'a>(node: &'a Lsd, prefix: Vec<PathSegment>, out: &mut Vec<(Vec<PathSegment>, &'a Lsd)>) {
    out.push((prefix.clone(), node));
    match node {
        Lsd::Value(_) => {}
        Lsd::List(list) => {
            for (index, item) in list.iter().enumerate() {
                let mut path = prefix.clone();
                path.push(PathSegment::Index(index as i64));
                walk(item, path, out);
            }
        }
        Lsd::Level(level) => {
            for (key, child) in level {
                let mut path = prefix.clone();
                path.push(PathSegment::Key(key.clone()));
                walk(child, path, out);
            }
        }
    }
}

#[test]
fn every_node_is_reachable_by_its_path() {
    fn prop(tree: ArbTree) -> bool {
        let mut nodes = Vec::new();
        walk(&tree.0, Vec::new(), &mut nodes);

        nodes
            .iter()
            .all(|(path, node)| tree.0.inner(&path[..]) == Some(*node))
    }

    quickcheck::quickcheck(prop as fn(ArbTree) -> bool);
}
