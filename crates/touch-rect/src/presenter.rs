//! A [`Presenter`] that records what it was asked to show.

use std::collections::BTreeSet;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use touch_rect_core::OrientedRect3D;
use touch_rect_select::{Message, ObjectHandle, OutlineHandle, OutlineStyle, Presenter};

/// One presentation side effect, in the order the engine requested it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PresentationEvent {
    Message {
        message: Option<Message>,
    },
    DrawOutline {
        handle: OutlineHandle,
        points: [Point2<f32>; 4],
        style: OutlineStyle,
    },
    RemoveOutline {
        handle: OutlineHandle,
    },
    PlaceObject {
        handle: ObjectHandle,
        rect: OrientedRect3D,
    },
    RemoveObject {
        handle: ObjectHandle,
    },
}

/// Headless presenter used by replays, tests and the CLI.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Vec<PresentationEvent>,
    next_handle: u64,
    outlines: BTreeSet<u64>,
    objects: BTreeSet<u64>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take_events(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Outlines drawn and not yet removed.
    pub fn visible_outlines(&self) -> usize {
        self.outlines.len()
    }

    /// Objects placed and not yet removed.
    pub fn visible_objects(&self) -> usize {
        self.objects.len()
    }

    fn allocate(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Presenter for RecordingPresenter {
    fn set_message(&mut self, message: Option<Message>) {
        self.events.push(PresentationEvent::Message { message });
    }

    fn draw_outline(&mut self, points: &[Point2<f32>; 4], style: &OutlineStyle) -> OutlineHandle {
        let handle = OutlineHandle(self.allocate());
        self.outlines.insert(handle.0);
        self.events.push(PresentationEvent::DrawOutline {
            handle,
            points: *points,
            style: *style,
        });
        handle
    }

    fn remove_outline(&mut self, handle: OutlineHandle) {
        if !self.outlines.remove(&handle.0) {
            log::warn!("removing unknown outline {}", handle.0);
        }
        self.events.push(PresentationEvent::RemoveOutline { handle });
    }

    fn place_object(&mut self, rect: &OrientedRect3D) -> ObjectHandle {
        let handle = ObjectHandle(self.allocate());
        self.objects.insert(handle.0);
        self.events.push(PresentationEvent::PlaceObject {
            handle,
            rect: rect.clone(),
        });
        handle
    }

    fn remove_object(&mut self, handle: ObjectHandle) {
        if !self.objects.remove(&handle.0) {
            log::warn!("removing unknown object {}", handle.0);
        }
        self.events.push(PresentationEvent::RemoveObject { handle });
    }
}
