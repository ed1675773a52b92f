//! Main menu scene
//!
//! Holds the selection ring of buttons and the background music state.
//!
//! # Navigation
//!
//! - Up/Down move the selection around the ring (wrapping at both ends)
//! - Mouse movement selects whatever button is under the pointer
//! - Confirm (Enter, left click, joystick) performs the selected button's
//!   action, except the music button which toggles music here instead
//! - Hotkeys toggle music and open the web link without touching selection

use super::{Button, ButtonAction, ButtonKind, Effect, IconPair, SceneBase, SceneId};
use crate::audio::{AudioCommand, Sound};
use crate::config::Links;
use crate::input_system::{InputEvent, KeyBindings, NavAction};
use crate::render::{Frame, TextureId};
use sdl2::pixels::Color;
use sdl2::rect::Rect;

/// Side length of the square music and web icons
const ICON_SIZE: u32 = 64;

/// Gap between the corner icons and the screen edge
const ICON_MARGIN: i32 = 20;

pub struct MenuScene {
    pub(super) base: SceneBase,
    buttons: Vec<Button>,
    current_button: usize,
    music_on: bool,
    bindings: KeyBindings,
    screen_width: u32,
    screen_height: u32,
}

impl MenuScene {
    /// Build the main menu: Play, Map Maker, Instructions and Exit in a
    /// column, then the music and web icons in the bottom corners
    pub fn main_menu(
        title: &str,
        screen_width: u32,
        screen_height: u32,
        links: &Links,
        bindings: KeyBindings,
    ) -> Self {
        let column_x = (screen_width as f32 / 2.5) as i32;
        let row_height = screen_height as f32 / 4.0;
        let (width, height) = (screen_width / 4, screen_height / 20);
        let row = |factor: f32| Rect::new(column_x, (row_height * factor) as i32, width, height);

        let icon_y = screen_height as i32 - ICON_SIZE as i32 - ICON_MARGIN;

        let buttons = vec![
            Button::new(
                ButtonKind::Play,
                row(1.0),
                ButtonAction::SwitchScene(SceneId::LevelMenu),
            ),
            Button::new(ButtonKind::MapMaker, row(1.6), ButtonAction::LaunchLevelMaker),
            Button::new(
                ButtonKind::Instructions,
                row(2.2),
                ButtonAction::OpenLink(links.instructions.clone()),
            ),
            Button::new(ButtonKind::Exit, row(2.8), ButtonAction::Exit),
            Button::new(
                ButtonKind::Music,
                Rect::new(ICON_MARGIN, icon_y, ICON_SIZE, ICON_SIZE),
                ButtonAction::ToggleMusic,
            ),
            Button::new(
                ButtonKind::Web,
                Rect::new(
                    screen_width as i32 - ICON_SIZE as i32 - ICON_MARGIN,
                    icon_y,
                    ICON_SIZE,
                    ICON_SIZE,
                ),
                ButtonAction::OpenLink(links.web.clone()),
            ),
        ];

        Self::with_buttons(title, screen_width, screen_height, buttons, bindings)
    }

    /// Menu over an arbitrary button ring; the first button starts selected
    pub fn with_buttons(
        title: &str,
        screen_width: u32,
        screen_height: u32,
        mut buttons: Vec<Button>,
        bindings: KeyBindings,
    ) -> Self {
        if let Some(first) = buttons.first_mut() {
            first.set_selected(true);
        }

        MenuScene {
            base: SceneBase::new(title),
            buttons,
            current_button: 0,
            music_on: true,
            bindings,
            screen_width,
            screen_height,
        }
    }

    #[cfg(test)]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    #[cfg(test)]
    pub fn current_button(&self) -> usize {
        self.current_button
    }

    #[cfg(test)]
    pub fn music_on(&self) -> bool {
        self.music_on
    }

    pub(super) fn enter(&mut self, effects: &mut Vec<Effect>) {
        if self.music_on {
            effects.push(Effect::Audio(AudioCommand::PlayMusic));
        }
    }

    pub fn execute_event(&mut self, event: &InputEvent, effects: &mut Vec<Effect>) {
        match self.bindings.action_for(event) {
            Some(NavAction::Up) => self.arrow_up(effects),
            Some(NavAction::Down) => self.arrow_down(effects),
            Some(NavAction::Confirm) => self.confirm(effects),
            Some(NavAction::Click(x, y)) => {
                self.hover(x, y);
                self.confirm(effects);
            }
            Some(NavAction::Hover(x, y)) => self.hover(x, y),
            Some(NavAction::ToggleMusic) => self.toggle_music(effects),
            Some(NavAction::OpenWebLink) => self.open_web_link(effects),
            Some(NavAction::Close) => self.close(effects),
            Some(NavAction::Back) | None => {}
        }
    }

    /// Move the selection up, wrapping from the first button to the last
    pub fn arrow_up(&mut self, effects: &mut Vec<Effect>) {
        if self.buttons.is_empty() {
            return;
        }
        effects.push(Effect::Audio(AudioCommand::Play(Sound::Click)));

        let next = if self.current_button == 0 {
            self.buttons.len() - 1
        } else {
            self.current_button - 1
        };
        self.select(next);
    }

    /// Move the selection down, wrapping from the last button to the first
    pub fn arrow_down(&mut self, effects: &mut Vec<Effect>) {
        if self.buttons.is_empty() {
            return;
        }
        effects.push(Effect::Audio(AudioCommand::Play(Sound::Click)));

        let next = (self.current_button + 1) % self.buttons.len();
        self.select(next);
    }

    /// Perform the selected button's action
    ///
    /// Does nothing when the current button isn't selected, which happens
    /// while the pointer hovers over empty space.
    pub fn confirm(&mut self, effects: &mut Vec<Effect>) {
        let Some(button) = self.buttons.get(self.current_button) else {
            return;
        };
        if !button.is_selected() {
            log::debug!("Confirm with no button under selection, ignoring");
            return;
        }

        if button.kind() == ButtonKind::Music {
            self.toggle_music(effects);
            return;
        }

        log::info!("{:?} button pressed", button.kind());
        button.perform(effects);
    }

    /// Select the button under the pointer, deselecting every other one
    pub fn hover(&mut self, x: i32, y: i32) {
        for (index, button) in self.buttons.iter_mut().enumerate() {
            if button.contains(x, y) {
                button.set_selected(true);
                self.current_button = index;
            } else {
                button.set_selected(false);
            }
        }
    }

    pub fn toggle_music(&mut self, effects: &mut Vec<Effect>) {
        self.music_playing(!self.music_on, effects);
    }

    /// Switch background music on or off and update the music button
    ///
    /// Turning music off force-selects the music button and swaps it to the
    /// "off" icons; turning it on swaps back and deselects it unless it is
    /// the current selection.
    pub fn music_playing(&mut self, on: bool, effects: &mut Vec<Effect>) {
        self.music_on = on;
        log::info!("Music {}", if on { "on" } else { "off" });

        let command = if on {
            AudioCommand::PlayMusic
        } else {
            AudioCommand::PauseMusic
        };
        effects.push(Effect::Audio(command));

        let current = self.current_button;
        let Some((index, button)) = self
            .buttons
            .iter_mut()
            .enumerate()
            .find(|(_, button)| button.kind() == ButtonKind::Music)
        else {
            return;
        };

        if on {
            if index != current {
                button.set_selected(false);
            }
            button.set_icons(IconPair::MUSIC_ON);
        } else {
            button.set_selected(true);
            button.set_icons(IconPair::MUSIC_OFF);
        }
    }

    fn open_web_link(&mut self, effects: &mut Vec<Effect>) {
        match self.buttons.iter().find(|b| b.kind() == ButtonKind::Web) {
            Some(button) => button.perform(effects),
            None => log::debug!("No web button in this menu"),
        }
    }

    fn close(&mut self, effects: &mut Vec<Effect>) {
        effects.push(Effect::Audio(AudioCommand::StopAll));
        effects.push(Effect::Quit);
        self.base.running = false;
    }

    fn select(&mut self, index: usize) {
        for button in &mut self.buttons {
            button.set_selected(false);
        }
        self.buttons[index].set_selected(true);
        self.current_button = index;
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.clear(Color::WHITE);
        frame.texture(
            TextureId::Background,
            Rect::new(0, 0, self.screen_width, self.screen_height),
        );

        let title_height = self.screen_height / 8;
        frame.text(
            "aMaze",
            (self.screen_width / 3) as i32,
            (self.screen_height / 16) as i32,
            title_height,
            Color::BLACK,
        );

        for button in &self.buttons {
            button.draw(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Transition;
    use sdl2::keyboard::Keycode;
    use sdl2::mouse::MouseButton;

    fn main_menu() -> MenuScene {
        MenuScene::main_menu("Main Menu", 800, 800, &Links::default(), KeyBindings::default())
    }

    /// Four stacked 200x40 buttons, the last one being the music toggle
    fn four_item_menu() -> MenuScene {
        let row = |i: i32| Rect::new(300, 100 + i * 100, 200, 40);
        let buttons = vec![
            Button::new(
                ButtonKind::Play,
                row(0),
                ButtonAction::SwitchScene(SceneId::LevelMenu),
            ),
            Button::new(ButtonKind::MapMaker, row(1), ButtonAction::LaunchLevelMaker),
            Button::new(ButtonKind::Exit, row(2), ButtonAction::Exit),
            Button::new(ButtonKind::Music, row(3), ButtonAction::ToggleMusic),
        ];
        MenuScene::with_buttons("Menu", 800, 800, buttons, KeyBindings::default())
    }

    fn press(menu: &mut MenuScene, key: Keycode) -> Vec<Effect> {
        let mut effects = Vec::new();
        menu.execute_event(&InputEvent::KeyPressed(key), &mut effects);
        effects
    }

    fn selected_count(menu: &MenuScene) -> usize {
        menu.buttons().iter().filter(|b| b.is_selected()).count()
    }

    #[test]
    fn test_four_item_wrap_scenario() {
        let mut menu = four_item_menu();
        assert_eq!(menu.current_button(), 0);

        press(&mut menu, Keycode::Up);
        assert_eq!(menu.current_button(), 3);
        press(&mut menu, Keycode::Up);
        assert_eq!(menu.current_button(), 2);
        press(&mut menu, Keycode::Down);
        press(&mut menu, Keycode::Down);
        assert_eq!(menu.current_button(), 0);
    }

    #[test]
    fn test_ring_closure() {
        let mut menu = main_menu();
        let n = menu.buttons().len();

        for start in 0..n {
            menu.select(start);
            for _ in 0..n {
                press(&mut menu, Keycode::Down);
            }
            assert_eq!(menu.current_button(), start);

            for _ in 0..n {
                press(&mut menu, Keycode::Up);
            }
            assert_eq!(menu.current_button(), start);
        }
    }

    #[test]
    fn test_exactly_one_selected_after_arrows() {
        let mut menu = main_menu();
        let keys = [Keycode::Down, Keycode::Down, Keycode::Up, Keycode::Down, Keycode::Up, Keycode::Up];

        for key in keys {
            press(&mut menu, key);
            assert_eq!(selected_count(&menu), 1);
            assert!(menu.buttons()[menu.current_button()].is_selected());
        }
    }

    #[test]
    fn test_exactly_one_selected_after_arrow_even_when_music_off() {
        let mut menu = main_menu();
        press(&mut menu, Keycode::M);
        assert_eq!(selected_count(&menu), 2);

        press(&mut menu, Keycode::Down);
        assert_eq!(selected_count(&menu), 1);
        assert_eq!(menu.current_button(), 1);
    }

    #[test]
    fn test_arrows_play_click() {
        let mut menu = main_menu();
        let effects = press(&mut menu, Keycode::Down);
        assert_eq!(effects, vec![Effect::Audio(AudioCommand::Play(Sound::Click))]);
    }

    #[test]
    fn test_m_hotkey_turns_music_off() {
        let mut menu = main_menu();
        assert!(menu.music_on());

        let effects = press(&mut menu, Keycode::M);

        assert!(!menu.music_on());
        assert_eq!(effects, vec![Effect::Audio(AudioCommand::PauseMusic)]);
        let music = menu
            .buttons()
            .iter()
            .find(|b| b.kind() == ButtonKind::Music)
            .unwrap();
        assert!(music.is_selected());
        assert_eq!(music.icons(), IconPair::MUSIC_OFF);
        assert_eq!(menu.current_button(), 0);
    }

    #[test]
    fn test_music_back_on_restores_icons() {
        let mut menu = main_menu();
        press(&mut menu, Keycode::M);
        let effects = press(&mut menu, Keycode::M);

        assert!(menu.music_on());
        assert_eq!(effects, vec![Effect::Audio(AudioCommand::PlayMusic)]);
        let music = &menu.buttons()[4];
        assert!(!music.is_selected());
        assert_eq!(music.icons(), IconPair::MUSIC_ON);
        assert_eq!(selected_count(&menu), 1);
    }

    #[test]
    fn test_confirm_on_music_only_toggles() {
        let mut menu = four_item_menu();
        press(&mut menu, Keycode::Up);
        assert_eq!(menu.current_button(), 3);

        let effects = press(&mut menu, Keycode::Return);
        assert_eq!(menu.current_button(), 3);
        assert!(!menu.music_on());
        assert_eq!(menu.buttons()[3].icons(), IconPair::MUSIC_OFF);
        assert_eq!(effects, vec![Effect::Audio(AudioCommand::PauseMusic)]);

        let effects = press(&mut menu, Keycode::Return);
        assert_eq!(menu.current_button(), 3);
        assert!(menu.music_on());
        assert!(menu.buttons()[3].is_selected());
        assert_eq!(menu.buttons()[3].icons(), IconPair::MUSIC_ON);
        assert_eq!(effects, vec![Effect::Audio(AudioCommand::PlayMusic)]);
    }

    #[test]
    fn test_confirm_performs_action_once() {
        let mut menu = main_menu();

        let effects = press(&mut menu, Keycode::Return);
        assert_eq!(
            effects,
            vec![Effect::Transition(Transition::SwitchTo(SceneId::LevelMenu))]
        );

        press(&mut menu, Keycode::Down);
        let effects = press(&mut menu, Keycode::Return);
        assert_eq!(effects, vec![Effect::LaunchLevelMaker]);

        press(&mut menu, Keycode::Down);
        let effects = press(&mut menu, Keycode::Return);
        assert_eq!(
            effects,
            vec![Effect::OpenLink(Links::default().instructions)]
        );
    }

    #[test]
    fn test_joystick_confirm() {
        let mut menu = main_menu();
        let mut effects = Vec::new();
        menu.execute_event(&InputEvent::JoystickPressed { button: 0 }, &mut effects);
        assert_eq!(
            effects,
            vec![Effect::Transition(Transition::SwitchTo(SceneId::LevelMenu))]
        );
    }

    #[test]
    fn test_hover_selects_button_under_pointer() {
        let mut menu = four_item_menu();
        menu.hover(350, 320);

        assert_eq!(menu.current_button(), 2);
        assert_eq!(selected_count(&menu), 1);
        assert!(menu.buttons()[2].is_selected());
    }

    #[test]
    fn test_hover_over_nothing_deselects_all() {
        let mut menu = four_item_menu();
        menu.hover(5, 5);

        assert_eq!(selected_count(&menu), 0);
        assert_eq!(menu.current_button(), 0);

        let mut effects = Vec::new();
        menu.confirm(&mut effects);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_click_selects_then_confirms() {
        let mut menu = four_item_menu();
        let mut effects = Vec::new();
        menu.execute_event(
            &InputEvent::MousePressed {
                button: MouseButton::Left,
                x: 310,
                y: 210,
            },
            &mut effects,
        );

        assert_eq!(menu.current_button(), 1);
        assert_eq!(effects, vec![Effect::LaunchLevelMaker]);
    }

    #[test]
    fn test_web_hotkey_ignores_selection() {
        let mut menu = main_menu();
        let effects = press(&mut menu, Keycode::W);

        assert_eq!(effects, vec![Effect::OpenLink(Links::default().web)]);
        assert_eq!(menu.current_button(), 0);
    }

    #[test]
    fn test_close_stops_audio_and_quits() {
        let mut menu = main_menu();
        let mut effects = Vec::new();
        menu.execute_event(&InputEvent::Closed, &mut effects);

        assert_eq!(
            effects,
            vec![Effect::Audio(AudioCommand::StopAll), Effect::Quit]
        );
    }

    #[test]
    fn test_enter_starts_music_only_when_on() {
        let mut menu = main_menu();
        let mut effects = Vec::new();
        menu.enter(&mut effects);
        assert_eq!(effects, vec![Effect::Audio(AudioCommand::PlayMusic)]);

        let mut ignored = Vec::new();
        menu.toggle_music(&mut ignored);
        let mut effects = Vec::new();
        menu.enter(&mut effects);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_main_menu_buttons_do_not_overlap() {
        let menu = main_menu();
        let buttons = menu.buttons();
        for (i, a) in buttons.iter().enumerate() {
            for b in &buttons[i + 1..] {
                assert!(!a.bounds().has_intersection(b.bounds()), "{:?} overlaps {:?}", a.kind(), b.kind());
            }
        }
    }

    #[test]
    fn test_draw_uses_selected_icon() {
        let menu = main_menu();
        let mut frame = Frame::new();
        menu.draw(&mut frame);

        let textures: Vec<_> = frame.textures().collect();
        assert_eq!(textures[0], TextureId::Background);
        assert!(textures.contains(&TextureId::PlaySelected));
        assert!(textures.contains(&TextureId::Exit));
        assert!(!textures.contains(&TextureId::Play));
    }
}
