// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page components: map, editor, statistics and notifications.

pub mod editor;
pub mod html;
pub mod map;
pub mod page;
pub mod stats_panel;
pub mod toast;

pub use editor::{CountrySelector, EditorError, EditorMode, EditorState, PlaceEditor, PlaceForm};
pub use map::{MapData, MapInteraction, MapRenderer, StatusPalette, Tooltip};
pub use page::{ReloadTicket, TravelPage};
pub use toast::{Toast, ToastLevel, Toasts};
