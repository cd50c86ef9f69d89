//! Terminal rendering for Flappy Bird.

use flappy::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use flappy::game::Rect as GameRect;
use flappy::scene::{Rgb, Scene, BIRD_YELLOW, PIPE_GREEN};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Render the scene inside a bordered box.
pub fn render_flappy(frame: &mut Frame, area: Rect, scene: &Scene) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Flappy Bird ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let play_area = fit_play_area(inner);
    render_play_area(frame, play_area, scene);
    render_overlay(frame, play_area, scene);
}

/// Largest centered area that keeps the logical aspect ratio.
pub fn fit_play_area(area: Rect) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }

    let wanted = SCREEN_WIDTH / SCREEN_HEIGHT * CELL_ASPECT;
    let (width, height) = if area.width as f64 / area.height as f64 > wanted {
        ((area.height as f64 * wanted).round() as u16, area.height)
    } else {
        (area.width, (area.width as f64 / wanted).round() as u16)
    };
    let width = width.clamp(1, area.width);
    let height = height.clamp(1, area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn contains(rect: &GameRect, x: f64, y: f64) -> bool {
    x >= rect.min_x as f64 && x < rect.max_x as f64 && y >= rect.min_y as f64 && y < rect.max_y as f64
}

/// Colour of the logical point sampled at the center of a cell.
fn sample(scene: &Scene, x: f64, y: f64) -> Rgb {
    if let Some(bird) = &scene.bird {
        if contains(bird, x, y) {
            return BIRD_YELLOW;
        }
    }
    if scene.barriers.iter().any(|r| contains(r, x, y)) {
        return PIPE_GREEN;
    }
    scene.background
}

/// Fill the play area cell by cell.
fn render_play_area(frame: &mut Frame, area: Rect, scene: &Scene) {
    let width = area.width as usize;
    let height = area.height as usize;

    if width == 0 || height == 0 {
        return;
    }

    let x_scale = SCREEN_WIDTH / width as f64;
    let y_scale = SCREEN_HEIGHT / height as f64;

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let y = (row as f64 + 0.5) * y_scale;
        let mut spans: Vec<Span> = Vec::new();
        let mut run = String::new();
        let mut run_color = None;

        // Merge neighbouring cells of the same colour into one span
        for col in 0..width {
            let x = (col as f64 + 0.5) * x_scale;
            let color = sample(scene, x, y);
            if run_color != Some(color) {
                if let Some(prev) = run_color {
                    spans.push(Span::styled(
                        std::mem::take(&mut run),
                        Style::default().bg(to_color(prev)),
                    ));
                }
                run_color = Some(color);
            }
            run.push(' ');
        }
        if let Some(prev) = run_color {
            spans.push(Span::styled(run, Style::default().bg(to_color(prev))));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Draw the overlay text in the top-left corner, keeping the colours below.
fn render_overlay(frame: &mut Frame, area: Rect, scene: &Scene) {
    let lines: Vec<Line> = scene
        .overlay
        .iter()
        .map(|text| {
            Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
