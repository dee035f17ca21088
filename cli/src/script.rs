//! Gesture scripts: a recorded sequence of host input events replayed
//! through a [`TransformableObject`], collecting everything it emits.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use serde::{Deserialize, Serialize};
use shape_transform::{Geometry, Key, Modifiers, Options, Point, TransformObserver, TransformableObject};

/// A recorded interaction with one shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Geometry before the first event.
    pub geometry: Geometry,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub locked: bool,
    /// Options embedded in the script; `--options` takes precedence.
    #[serde(default)]
    pub options: Option<Options>,
    pub events: Vec<ScriptEvent>,
}

/// One host input event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScriptEvent {
    Down {
        x: f64,
        y: f64,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up,
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Select {
        value: bool,
    },
    Lock {
        value: bool,
    },
}

/// Something the engine emitted while replaying event number `event`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Emitted {
    Geometry { event: usize, geometry: Geometry },
    Duplicate { event: usize, source: Geometry },
}

#[derive(Debug, Default)]
struct Recorder {
    event: usize,
    emitted: Vec<Emitted>,
}

impl TransformObserver for Recorder {
    fn geometry_changed(&mut self, geometry: &Geometry) {
        self.emitted.push(Emitted::Geometry { event: self.event, geometry: *geometry });
    }

    fn duplicate_requested(&mut self, source: &Geometry) {
        self.emitted.push(Emitted::Duplicate { event: self.event, source: *source });
    }
}

/// Replay `script` with `options` and return every emission in order.
#[must_use]
pub fn replay(script: &Script, options: Options) -> Vec<Emitted> {
    let mut object = TransformableObject::new(script.geometry, options, Recorder::default());
    object.set_selected(script.selected);
    object.set_locked(script.locked);

    for (index, event) in script.events.iter().enumerate() {
        object.observer_mut().event = index;
        match event {
            ScriptEvent::Down { x, y } => {
                if !object.pointer_down(Point::new(*x, *y)) {
                    tracing::debug!(event = index, "pointer-down ignored");
                }
            }
            ScriptEvent::Move { x, y, modifiers } => object.pointer_move(Point::new(*x, *y), *modifiers),
            ScriptEvent::Up => object.pointer_up(),
            ScriptEvent::Key { key, modifiers } => object.key_down(&Key::new(key.as_str()), *modifiers),
            ScriptEvent::Select { value } => object.set_selected(*value),
            ScriptEvent::Lock { value } => object.set_locked(*value),
        }
    }

    std::mem::take(&mut object.observer_mut().emitted)
}
