//! Column layout through Taffy.
//!
//! The table is one flex row: a leaf per column, each with a percent width
//! and no shrink. Taffy resolves the percents against the terminal width and
//! rounds positions so adjacent columns never overlap or leave holes.

use taffy::{
    AvailableSpace, Dimension, Display, FlexDirection, NodeId, Size, Style, TaffyTree,
};

use crate::error::Result;

/// Horizontal extent of one column, in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnSpan {
    pub x: u16,
    pub width: u16,
}

impl ColumnSpan {
    pub fn end(self) -> u16 {
        self.x.saturating_add(self.width)
    }
}

fn column_style(percent: f32) -> Style {
    Style {
        size: Size {
            width: Dimension::Percent(percent / 100.0),
            height: Dimension::Length(1.0),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

/// Lay out columns of `percents` widths across `total_width` cells.
pub fn layout_columns(percents: &[f32], total_width: u16) -> Result<Vec<ColumnSpan>> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let leaves = percents
        .iter()
        .map(|&percent| tree.new_leaf(column_style(percent)))
        .collect::<std::result::Result<Vec<NodeId>, _>>()?;

    let width = f32::from(total_width);
    let root = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            size: Size {
                width: Dimension::Length(width),
                height: Dimension::Length(1.0),
            },
            ..Default::default()
        },
        &leaves,
    )?;

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::MaxContent,
        },
    )?;

    leaves
        .iter()
        .map(|&leaf| {
            let layout = tree.layout(leaf)?;
            Ok(ColumnSpan {
                x: layout.location.x.round() as u16,
                width: layout.size.width.round() as u16,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_columns_on_100_cells() {
        let spans = layout_columns(&[3.0, 15.0, 6.0], 100).unwrap();
        assert_eq!(
            spans,
            vec![
                ColumnSpan { x: 0, width: 3 },
                ColumnSpan { x: 3, width: 15 },
                ColumnSpan { x: 18, width: 6 },
            ]
        );
    }

    #[test]
    fn test_columns_are_contiguous() {
        let percents = [3.0, 15.0, 6.0, 4.0, 4.0, 5.0, 12.0, 10.0, 10.0, 9.0, 9.0, 12.0];
        let spans = layout_columns(&percents, 137).unwrap();
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end(), pair[1].x);
        }
        assert!(spans.last().unwrap().end() <= 137);
    }

    #[test]
    fn test_no_columns() {
        assert!(layout_columns(&[], 80).unwrap().is_empty());
    }

    #[test]
    fn test_zero_width_terminal() {
        let spans = layout_columns(&[50.0, 50.0], 0).unwrap();
        assert!(spans.iter().all(|s| s.width == 0));
    }
}
