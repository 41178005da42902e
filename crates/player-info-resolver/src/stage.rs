//! Host display-surface port used by the fallback dialog.
//!
//! Rendering itself stays on the host side; the dialog only needs a handful
//! of display-tree operations on its own root node, the hover-capable input
//! plugin lifecycle, and enough probes to decide whether it fits on screen.

use serde::{Deserialize, Serialize};

/// Reserved operation-plugin opcode for the hover plugin registration.
pub const HOVER_PLUGIN_OPCODE: i32 = -1000;

/// Identifier of a host scene. The dialog refuses to operate once the active
/// scene is no longer the one it was constructed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SceneId(pub u64);

/// Host stage surface consumed by the fallback dialog.
pub trait StagePort {
    /// Current surface size in pixels (width, height).
    fn surface_size(&self) -> (u32, u32);

    /// Whether hover-capable input is available at all.
    fn supports_hover_input(&self) -> bool;

    /// The currently active scene.
    fn active_scene(&self) -> SceneId;

    /// Whether an operation plugin is already registered under `opcode`.
    fn is_hover_plugin_registered(&self, opcode: i32) -> bool;

    /// Register the hover plugin under `opcode`.
    fn register_hover_plugin(&mut self, opcode: i32);

    /// Start scanning for hover events.
    fn start_hover_plugin(&mut self, opcode: i32);

    /// Stop scanning for hover events.
    fn stop_hover_plugin(&mut self, opcode: i32);

    /// Append the dialog's root node to the active scene's display tree.
    fn append_modal_root(&mut self);

    /// Remove the dialog's root node from the display tree.
    fn remove_modal_root(&mut self);

    /// Whether the dialog's root node is the last sibling (frontmost).
    fn is_modal_root_frontmost(&self) -> bool;

    /// Re-append the dialog's root node so it becomes frontmost again.
    fn bring_modal_root_to_front(&mut self);
}
