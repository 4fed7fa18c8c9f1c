// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transient notifications shown above the page.

use crate::ui::html::escape;
use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    created_at: Instant,
}

/// Queue of notifications, oldest first.
#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    /// Queue an error notification. Every error shown is also logged.
    pub fn push_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(message = %message, "Showing error notification");
        self.push(ToastLevel::Error, message);
    }

    fn push(&mut self, level: ToastLevel, message: String) {
        self.items.push(Toast {
            level,
            message,
            created_at: Instant::now(),
        });
    }

    /// Drop expired notifications and return the rest.
    pub fn active_at(&mut self, now: Instant) -> &[Toast] {
        self.items
            .retain(|t| now.saturating_duration_since(t.created_at) < TOAST_LIFETIME);
        &self.items
    }

    /// Notifications queued so far, expired or not.
    pub fn all(&self) -> &[Toast] {
        &self.items
    }

    pub fn last(&self) -> Option<&Toast> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Notifications still visible at `now`.
    pub fn render_html(&self, now: Instant) -> String {
        let mut active = self
            .items
            .iter()
            .filter(|t| now.saturating_duration_since(t.created_at) < TOAST_LIFETIME)
            .peekable();
        if active.peek().is_none() {
            return String::new();
        }
        let mut html = String::from(r#"<div class="toasts" role="status">"#);
        for toast in active {
            let class = match toast.level {
                ToastLevel::Success => "toast toast-success",
                ToastLevel::Error => "toast toast-error",
            };
            html.push_str(&format!(
                r#"<div class="{}">{}</div>"#,
                class,
                escape(&toast.message)
            ));
        }
        html.push_str("</div>");
        html
    }
}
