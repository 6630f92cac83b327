// SPDX-License-Identifier: GPL-3.0-or-later

pub mod adif;
pub mod band;
pub mod logbook;
pub mod menu;
pub mod preferences;
pub mod record;
pub mod stats;
pub mod util;
