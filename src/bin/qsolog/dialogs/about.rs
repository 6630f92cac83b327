use iced::{
    Element, Length,
    alignment::Horizontal,
    widget::{button, column, image, text},
};

use crate::{resources, widgets::BOLD};

const LICENSE: &str = "This program is free software: you can redistribute it and/or modify it \
under the terms of the GNU General Public License as published by the Free Software Foundation, \
either version 3 of the License, or (at your option) any later version.";

pub struct About {
    logo: Option<image::Handle>,
}

impl About {
    pub fn new() -> Self {
        let logo = match resources::read("logo.png") {
            Ok(bytes) => Some(image::Handle::from_bytes(bytes)),
            Err(err) => {
                log::warn!("Could not load logo: {err:#}");
                None
            }
        };
        Self { logo }
    }
}

impl super::Dialog for About {
    fn title(&self) -> String {
        format!("About {}", env!("CARGO_PKG_NAME"))
    }

    fn view(&self) -> Element<'_, super::Message> {
        let mut content = column![].spacing(10).align_x(Horizontal::Center);
        if let Some(logo) = &self.logo {
            content = content.push(image(logo.clone()).width(Length::Fixed(96.0)));
        }
        content
            .push(text(env!("CARGO_PKG_NAME")).font(BOLD).size(24))
            .push(text(format!("Version {}", env!("CARGO_PKG_VERSION"))))
            .push(text(env!("CARGO_PKG_DESCRIPTION")))
            .push(text(format!("Authors: {}", env!("CARGO_PKG_AUTHORS").replace(':', ", "))))
            .push(text(LICENSE).size(12))
            .push(
                button("Close")
                    .on_press(super::dismiss())
                    .padding([5, 15])
                    .style(button::primary),
            )
            .width(Length::Fill)
            .into()
    }
}
