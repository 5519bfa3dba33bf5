//! Build the conditional tree of a fork from its text.

use crate::{
    consts::{ENDIF_KEYWORD, IF_KEYWORD},
    error::{MetaData, ParseError, ParseErrorKind},
    line::scan::{end_of_line, find_whole_words, is_inside_output, is_on_option_line},
    node::tree::{NodeId, ParseTree},
};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Marker {
    If,
    EndIf,
}

/// Parse the body of a fork into a tree of conditional blocks.
///
/// Every `if` opens a block which lasts until its matching `endif`. Text between markers
/// belongs to the innermost open block. Markers inside output blocks or on option lines
/// are plain text.
///
/// Problems which still let the tree be built are returned alongside it. An `endif`
/// without an open block cannot be recovered from and is returned as the error.
pub fn build_tree(
    fork: &str,
    body: &str,
    meta_data: &MetaData,
) -> Result<(ParseTree, Vec<ParseError>), ParseError> {
    let markers = find_markers(body);
    let mut errors = Vec::new();

    let num_ifs = markers.iter().filter(|(_, marker)| *marker == Marker::If).count();
    let num_endifs = markers.len() - num_ifs;

    if num_ifs != num_endifs {
        let kind = ParseErrorKind::UnbalancedConditionals {
            fork: fork.to_string(),
            ifs: num_ifs,
            endifs: num_endifs,
        };

        errors.push(ParseError::new(kind, meta_data));
    }

    let mut tree = ParseTree::new(meta_data);
    let mut current = NodeId::ROOT;

    let mut segment_start = 0;
    let mut previous_line_end: Option<usize> = None;

    for (index, marker) in markers {
        let line_meta_data = line_at(body, index, meta_data);

        if previous_line_end.map(|end| index < end).unwrap_or(false) {
            let kind = ParseErrorKind::MultipleMarkersOnLine {
                fork: fork.to_string(),
            };

            errors.push(ParseError::new(kind, &line_meta_data));
            continue;
        }

        add_segment(
            &mut tree,
            current,
            &body[segment_start..index],
            &line_at(body, segment_start, meta_data),
        );

        let line_end = end_of_line(body, index);

        match marker {
            Marker::If => {
                let condition = body[index..line_end].trim();
                let text_meta_data = line_meta_data.offset(1);

                current =
                    tree.push_child(current, condition, "", &line_meta_data, &text_meta_data);
            }
            Marker::EndIf => match tree[current].parent {
                Some(parent) => current = parent,
                None => {
                    let kind = ParseErrorKind::ExtraEndif {
                        fork: fork.to_string(),
                    };

                    return Err(ParseError::new(kind, &line_meta_data));
                }
            },
        }

        previous_line_end = Some(line_end);
        segment_start = (line_end + 1).min(body.len());
    }

    add_segment(
        &mut tree,
        NodeId::ROOT,
        &body[segment_start..],
        &line_at(body, segment_start, meta_data),
    );

    Ok((tree, errors))
}

/// Find all `if` and `endif` markers which are not part of displayed text, in order.
fn find_markers(body: &str) -> Vec<(usize, Marker)> {
    let is_marker = |index: &usize| {
        !is_inside_output(body, *index) && !is_on_option_line(body, *index)
    };

    let ifs = find_whole_words(body, IF_KEYWORD)
        .into_iter()
        .filter(is_marker)
        .map(|index| (index, Marker::If));

    let endifs = find_whole_words(body, ENDIF_KEYWORD)
        .into_iter()
        .filter(is_marker)
        .map(|index| (index, Marker::EndIf));

    let mut markers = ifs.chain(endifs).collect::<Vec<_>>();
    markers.sort_by_key(|(index, _)| *index);

    markers
}

/// Add a segment of text to a node.
///
/// The text becomes the node's own text if the node has none and no children yet,
/// otherwise it is added as a new unconditional child. Blank segments are dropped.
fn add_segment(tree: &mut ParseTree, node_id: NodeId, text: &str, meta_data: &MetaData) {
    if text.trim().is_empty() {
        return;
    }

    match tree.get_mut(node_id) {
        Some(node) if node.is_empty() => {
            node.text = text.to_string();
            node.text_meta_data = meta_data.clone();
        }
        Some(_) => {
            tree.push_child(node_id, "", text, meta_data, meta_data);
        }
        None => (),
    }
}

/// Meta data of the line which a position in the fork body lies on.
fn line_at(body: &str, index: usize, meta_data: &MetaData) -> MetaData {
    meta_data.offset(body[..index].matches('\n').count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(body: &str) -> ParseTree {
        let (tree, errors) = build_tree("fork", body, &MetaData::from(0)).unwrap();
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);

        tree
    }

    #[test]
    fn fork_without_markers_puts_all_text_in_the_root() {
        let tree = build("{Hello}\n{World}\n");

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().text, "{Hello}\n{World}\n");
    }

    #[test]
    fn blocks_hold_their_text_and_trailing_text_follows_as_a_sibling() {
        let tree = build("if a>0\n{pos}\nendif\n{done}");
        let children = tree.children(NodeId::ROOT);

        assert_eq!(children.len(), 2);

        let block = &tree[children[0]];
        assert_eq!(block.condition, "if a>0");
        assert_eq!(block.text, "{pos}\n");

        let trailing = &tree[children[1]];
        assert_eq!(trailing.condition, "");
        assert_eq!(trailing.text, "{done}");
    }

    #[test]
    fn text_before_the_first_block_belongs_to_the_root() {
        let tree = build("{start}\nif a\n{inside}\nendif\n");

        assert_eq!(tree.root().text, "{start}\n");
        assert_eq!(tree.children(NodeId::ROOT).len(), 1);
    }

    #[test]
    fn nested_blocks_are_children_of_their_enclosing_block() {
        let tree = build("if a\n{a}\nif b\n{b}\nendif\n{after b}\nendif\n");

        let outer = tree.children(NodeId::ROOT)[0];
        assert_eq!(tree[outer].text, "{a}\n");

        let outer_children = tree.children(outer);
        assert_eq!(outer_children.len(), 2);
        assert_eq!(tree[outer_children[0]].condition, "if b");
        assert_eq!(tree[outer_children[0]].text, "{b}\n");
        assert_eq!(tree[outer_children[0]].parent, Some(outer));
        assert_eq!(tree[outer_children[1]].text, "{after b}\n");
    }

    #[test]
    fn empty_blocks_are_kept_but_blank_text_is_dropped() {
        let tree = build("if a\n\nendif\n\n");

        assert_eq!(tree.len(), 2);
        assert!(tree[tree.children(NodeId::ROOT)[0]].is_empty());
    }

    #[test]
    fn markers_inside_output_or_option_lines_are_text() {
        let tree = build("{what if I go}\nWhat if@cave\n");

        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn markers_must_be_whole_words() {
        let tree = build("set gift = 1\nset endiff = 2\n");

        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn nodes_know_which_lines_they_came_from() {
        let (tree, _) = build_tree("fork", "{a}\n\nif b\n{b}\nendif\n{c}\n", &MetaData::from(10))
            .unwrap();

        let children = tree.children(NodeId::ROOT);

        assert_eq!(tree.root().text_meta_data, MetaData::from(10));
        assert_eq!(tree[children[0]].meta_data, MetaData::from(12));
        assert_eq!(tree[children[0]].text_meta_data, MetaData::from(13));
        assert_eq!(tree[children[1]].text_meta_data, MetaData::from(15));
    }

    #[test]
    fn unbalanced_markers_are_reported_but_the_tree_is_built() {
        let (tree, errors) = build_tree("fork", "if a\n{a}\n", &MetaData::from(0)).unwrap();

        assert_eq!(tree[tree.children(NodeId::ROOT)[0]].text, "{a}\n");
        assert_eq!(
            errors[0].kind,
            ParseErrorKind::UnbalancedConditionals {
                fork: "fork".to_string(),
                ifs: 1,
                endifs: 0
            }
        );
    }

    #[test]
    fn endif_without_open_block_is_fatal() {
        let error = build_tree("fork", "{a}\nendif\n", &MetaData::from(0)).unwrap_err();

        assert!(error.is_fatal());
        assert_eq!(error.meta_data, MetaData::from(1));
    }

    #[test]
    fn second_marker_on_a_line_is_skipped() {
        let (tree, errors) =
            build_tree("fork", "if a endif\n{a}\nendif\n", &MetaData::from(0)).unwrap();

        let error = ParseError::new(
            ParseErrorKind::MultipleMarkersOnLine {
                fork: "fork".to_string(),
            },
            &MetaData::from(0),
        );

        assert!(errors.contains(&error));

        let block = tree.children(NodeId::ROOT)[0];
        assert_eq!(tree[block].condition, "if a endif");
        assert_eq!(tree[block].text, "{a}\n");
    }
}
