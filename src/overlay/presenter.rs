use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Rect, SeriesId};
use crate::overlay::{OverlayState, SeriesReadout, TrackerSettings, layout_overlay};
use crate::render::Color;

/// Addressable element of the tracker overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OverlayNode {
    InfoBox,
    DistanceLabel,
    GuideLine,
    AltitudeLabel(SeriesId),
    Thumb(SeriesId),
}

/// Resting geometry and opacity of one node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeVisual {
    pub frame: Rect,
    pub opacity: f64,
}

impl NodeVisual {
    #[must_use]
    pub const fn shown(frame: Rect) -> Self {
        Self {
            frame,
            opacity: 1.0,
        }
    }

    #[must_use]
    pub const fn hidden(frame: Rect) -> Self {
        Self {
            frame,
            opacity: 0.0,
        }
    }

    #[must_use]
    pub fn is_visible(self) -> bool {
        self.opacity > 0.0
    }
}

/// Animation a host should run to move a node from `from` to `to`.
///
/// A zero duration means the change is applied immediately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayTransition {
    pub node: OverlayNode,
    pub from: NodeVisual,
    pub to: NodeVisual,
    pub duration_secs: f64,
}

/// Retained overlay nodes plus the texts they display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayScene {
    nodes: IndexMap<OverlayNode, NodeVisual>,
    distance_text: String,
    label_texts: IndexMap<SeriesId, (String, Color)>,
}

impl OverlayScene {
    #[must_use]
    pub fn node(&self, node: OverlayNode) -> Option<NodeVisual> {
        self.nodes.get(&node).copied()
    }

    /// Nodes in draw order: box, distance label, guide line, then per series
    /// label and thumb.
    pub fn nodes(&self) -> impl Iterator<Item = (OverlayNode, NodeVisual)> + '_ {
        self.nodes.iter().map(|(node, visual)| (*node, *visual))
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn distance_text(&self) -> &str {
        &self.distance_text
    }

    /// Last text and color shown by a series label.
    #[must_use]
    pub fn label_text(&self, series_id: SeriesId) -> Option<(&str, Color)> {
        self.label_texts
            .get(&series_id)
            .map(|(text, color)| (text.as_str(), *color))
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.nodes.values().all(|visual| !visual.is_visible())
    }
}

/// Projects `OverlayState` values onto a retained scene.
///
/// Only target changes produce transitions, so applying the same state again
/// is a no-op.
#[derive(Debug, Clone)]
pub struct OverlayPresenter {
    settings: TrackerSettings,
    plot_frame: Rect,
    view_height: f64,
    scene: OverlayScene,
}

impl OverlayPresenter {
    #[must_use]
    pub fn new(
        settings: TrackerSettings,
        plot_frame: Rect,
        view_height: f64,
        series_count: usize,
    ) -> Self {
        let mut empty = OverlayState::hidden();
        for index in 0..series_count {
            empty
                .readouts
                .insert(SeriesId::new(index), SeriesReadout::hidden(Color::CLEAR));
        }
        let layout = layout_overlay(&empty, plot_frame, view_height, &settings);

        let mut nodes = IndexMap::with_capacity(3 + 2 * series_count);
        nodes.insert(OverlayNode::InfoBox, NodeVisual::hidden(layout.box_frame));
        nodes.insert(
            OverlayNode::DistanceLabel,
            NodeVisual::hidden(layout.distance_label_frame),
        );
        nodes.insert(OverlayNode::GuideLine, NodeVisual::default());
        for (series_id, frame) in layout.label_frames {
            nodes.insert(OverlayNode::AltitudeLabel(series_id), NodeVisual::hidden(frame));
            nodes.insert(OverlayNode::Thumb(series_id), NodeVisual::default());
        }

        Self {
            settings,
            plot_frame,
            view_height,
            scene: OverlayScene {
                nodes,
                ..OverlayScene::default()
            },
        }
    }

    #[must_use]
    pub fn scene(&self) -> &OverlayScene {
        &self.scene
    }

    #[must_use]
    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn apply(&mut self, state: &OverlayState) -> Vec<OverlayTransition> {
        let mut transitions = Vec::new();

        if !state.visible {
            let nodes: Vec<OverlayNode> = self.scene.nodes.keys().copied().collect();
            for node in nodes {
                let current = self.scene.nodes[&node];
                self.retarget(node, NodeVisual::hidden(current.frame), &mut transitions);
            }
            return transitions;
        }

        let layout = layout_overlay(state, self.plot_frame, self.view_height, &self.settings);

        self.retarget(
            OverlayNode::InfoBox,
            NodeVisual::shown(layout.box_frame),
            &mut transitions,
        );
        self.retarget(
            OverlayNode::DistanceLabel,
            NodeVisual::shown(layout.distance_label_frame),
            &mut transitions,
        );
        let guide = match layout.guide_frame {
            Some(frame) => NodeVisual::shown(frame),
            None => NodeVisual::hidden(self.current_frame(OverlayNode::GuideLine)),
        };
        self.retarget(OverlayNode::GuideLine, guide, &mut transitions);

        for (series_id, readout) in &state.readouts {
            let label_node = OverlayNode::AltitudeLabel(*series_id);
            let thumb_node = OverlayNode::Thumb(*series_id);

            let label_frame = layout
                .label_frames
                .get(series_id)
                .copied()
                .unwrap_or_else(|| self.current_frame(label_node));
            let thumb_frame = layout.thumb_frames.get(series_id).copied().flatten();

            if readout.is_visible() {
                self.retarget(label_node, NodeVisual::shown(label_frame), &mut transitions);
            } else {
                self.retarget(label_node, NodeVisual::hidden(label_frame), &mut transitions);
            }
            let thumb = match thumb_frame {
                Some(frame) => NodeVisual::shown(frame),
                None => NodeVisual::hidden(self.current_frame(thumb_node)),
            };
            self.retarget(thumb_node, thumb, &mut transitions);

            if let Some(text) = &readout.text {
                self.scene
                    .label_texts
                    .insert(*series_id, (text.clone(), readout.text_color));
            }
        }

        let stale: Vec<SeriesId> = self
            .scene
            .nodes
            .keys()
            .filter_map(|node| match node {
                OverlayNode::Thumb(series_id) if !state.readouts.contains_key(series_id) => {
                    Some(*series_id)
                }
                _ => None,
            })
            .collect();
        for series_id in stale {
            for node in [
                OverlayNode::AltitudeLabel(series_id),
                OverlayNode::Thumb(series_id),
            ] {
                let frame = self.current_frame(node);
                self.retarget(node, NodeVisual::hidden(frame), &mut transitions);
            }
        }

        if let Some(text) = &state.distance_text {
            self.scene.distance_text.clone_from(text);
        }

        transitions
    }

    /// Fades every node out, keeping frames where they are.
    pub fn reset(&mut self) -> Vec<OverlayTransition> {
        self.apply(&OverlayState::hidden())
    }

    fn current_frame(&self, node: OverlayNode) -> Rect {
        self.scene
            .nodes
            .get(&node)
            .map(|visual| visual.frame)
            .unwrap_or_default()
    }

    fn retarget(
        &mut self,
        node: OverlayNode,
        target: NodeVisual,
        transitions: &mut Vec<OverlayTransition>,
    ) {
        let current = self
            .scene
            .nodes
            .get(&node)
            .copied()
            .unwrap_or(NodeVisual::hidden(target.frame));
        if current == target && self.scene.nodes.contains_key(&node) {
            return;
        }

        let duration_secs = self.duration_for(node, current, target);
        trace!(?node, duration_secs, "overlay transition");
        self.scene.nodes.insert(node, target);
        if current != target {
            transitions.push(OverlayTransition {
                node,
                from: current,
                to: target,
                duration_secs,
            });
        }
    }

    fn duration_for(&self, node: OverlayNode, from: NodeVisual, to: NodeVisual) -> f64 {
        let timing = self.settings.timing;
        let fade = if from.opacity == to.opacity {
            0.0
        } else {
            match node {
                OverlayNode::Thumb(_) if to.opacity > from.opacity => timing.thumb_show_secs,
                OverlayNode::Thumb(_) => timing.thumb_hide_secs,
                OverlayNode::AltitudeLabel(_) => timing.label_resize_secs,
                OverlayNode::InfoBox | OverlayNode::DistanceLabel | OverlayNode::GuideLine => {
                    timing.fade_secs
                }
            }
        };
        let movement = if from.frame == to.frame {
            0.0
        } else {
            match node {
                OverlayNode::Thumb(_) | OverlayNode::GuideLine => 0.0,
                OverlayNode::AltitudeLabel(_) => timing.label_resize_secs,
                OverlayNode::InfoBox | OverlayNode::DistanceLabel => timing.reposition_secs,
            }
        };
        fade.max(movement)
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{OverlayNode, OverlayPresenter};
    use crate::core::{Rect, ScreenPoint, SeriesId};
    use crate::overlay::{OverlaySide, OverlayState, SeriesReadout, TrackerSettings};
    use crate::render::Color;

    fn presenter(series_count: usize) -> OverlayPresenter {
        OverlayPresenter::new(
            TrackerSettings::default(),
            Rect::new(40.0, 0.0, 400.0, 200.0),
            220.0,
            series_count,
        )
    }

    fn visible_state(pointer_x: f64, hits: &[Option<f64>]) -> OverlayState {
        let readouts: IndexMap<SeriesId, SeriesReadout> = hits
            .iter()
            .enumerate()
            .map(|(index, hit)| {
                let readout = match hit {
                    Some(y) => SeriesReadout {
                        thumb_center: Some(ScreenPoint::new(pointer_x, *y)),
                        text: Some(format!("Alt : {}m", *y as i64)),
                        text_color: Color::WHITE,
                    },
                    None => SeriesReadout::hidden(Color::WHITE),
                };
                (SeriesId::new(index), readout)
            })
            .collect();
        OverlayState {
            visible: true,
            guide_x: Some(pointer_x),
            side: OverlaySide::opposite_to(pointer_x, Rect::new(40.0, 0.0, 400.0, 200.0)),
            distance_text: Some("Dist : 10m".to_owned()),
            readouts,
        }
    }

    #[test]
    fn new_scene_is_hidden_with_nodes_for_every_series() {
        let presenter = presenter(2);
        assert!(presenter.scene().is_hidden());
        assert_eq!(presenter.scene().node_count(), 3 + 4);
    }

    #[test]
    fn applying_same_state_twice_is_a_no_op() {
        let mut presenter = presenter(2);
        let state = visible_state(100.0, &[Some(50.0), None]);

        let first = presenter.apply(&state);
        assert!(!first.is_empty());
        let scene = presenter.scene().clone();

        let second = presenter.apply(&state);
        assert!(second.is_empty());
        assert_eq!(presenter.scene(), &scene);
    }

    #[test]
    fn thumb_show_and_hide_use_their_own_durations() {
        let mut presenter = presenter(1);
        let shown = presenter.apply(&visible_state(100.0, &[Some(50.0)]));
        let thumb_in = shown
            .iter()
            .find(|transition| transition.node == OverlayNode::Thumb(SeriesId::new(0)))
            .expect("thumb transition");
        assert_eq!(thumb_in.duration_secs, 0.4);

        let hidden = presenter.apply(&visible_state(100.0, &[None]));
        let thumb_out = hidden
            .iter()
            .find(|transition| transition.node == OverlayNode::Thumb(SeriesId::new(0)))
            .expect("thumb transition");
        assert_eq!(thumb_out.duration_secs, 0.2);
        assert_eq!(thumb_out.to.frame, thumb_in.to.frame);
    }

    #[test]
    fn thumb_moves_are_immediate_and_box_reposition_is_animated() {
        let mut presenter = presenter(1);
        presenter.apply(&visible_state(100.0, &[Some(50.0)]));

        let moved = presenter.apply(&visible_state(120.0, &[Some(60.0)]));
        let thumb = moved
            .iter()
            .find(|transition| transition.node == OverlayNode::Thumb(SeriesId::new(0)))
            .expect("thumb transition");
        assert_eq!(thumb.duration_secs, 0.0);
        assert!(
            moved
                .iter()
                .all(|transition| transition.node != OverlayNode::InfoBox)
        );

        let flipped = presenter.apply(&visible_state(400.0, &[Some(60.0)]));
        let info_box = flipped
            .iter()
            .find(|transition| transition.node == OverlayNode::InfoBox)
            .expect("box transition");
        assert_eq!(info_box.duration_secs, 0.4);
    }

    #[test]
    fn reset_fades_everything_and_keeps_frames() {
        let mut presenter = presenter(1);
        presenter.apply(&visible_state(100.0, &[Some(50.0)]));
        let box_frame = presenter
            .scene()
            .node(OverlayNode::InfoBox)
            .expect("box")
            .frame;

        let transitions = presenter.reset();
        assert!(!transitions.is_empty());
        assert!(presenter.scene().is_hidden());
        assert_eq!(
            presenter.scene().node(OverlayNode::InfoBox).expect("box").frame,
            box_frame
        );
        assert!(presenter.reset().is_empty());
        assert_eq!(presenter.scene().distance_text(), "Dist : 10m");
    }
}
