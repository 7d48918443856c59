//! Field drawing: background grid, particle squares and circuit traces

use glam::Vec2;

use super::color::{Paint, Rgb};
use super::surface::Surface;
use crate::consts::*;
use crate::distance;
use crate::sim::{Particle, Viewport};

/// Background grid look
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub spacing: f32,
    pub paint: Paint,
    pub line_width: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            spacing: GRID_SPACING,
            paint: Rgb::ACCENT.with_alpha(GRID_ALPHA),
            line_width: LINE_WIDTH,
        }
    }
}

/// Connection trace look
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStyle {
    /// Pairs at or beyond this distance are not connected
    pub max_distance: f32,
    pub color: Rgb,
    /// Alpha of a zero-length connection; fades linearly to 0 at `max_distance`
    pub max_alpha: f32,
    pub line_width: f32,
}

impl Default for TraceStyle {
    fn default() -> Self {
        Self {
            max_distance: CONNECTION_DISTANCE,
            color: Rgb::ACCENT,
            max_alpha: CONNECTION_ALPHA,
            line_width: LINE_WIDTH,
        }
    }
}

/// A pair of particles close enough to be joined
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub distance: f32,
    /// 1 - distance / max_distance
    pub closeness: f32,
}

impl Connection {
    pub fn is_self_pair(&self) -> bool {
        self.from == self.to
    }
}

/// Vertical then horizontal lines every `spacing` pixels, starting at 0 and
/// including a line exactly on the far edge when it lands there.
pub fn draw_grid<S: Surface>(surface: &mut S, viewport: Viewport, style: &GridStyle) {
    if !(style.spacing > 0.0) {
        return;
    }

    let mut i = 0u32;
    loop {
        let x = i as f32 * style.spacing;
        if x > viewport.width {
            break;
        }
        surface.stroke_path(
            &[Vec2::new(x, 0.0), Vec2::new(x, viewport.height)],
            style.paint,
            style.line_width,
        );
        i += 1;
    }

    let mut i = 0u32;
    loop {
        let y = i as f32 * style.spacing;
        if y > viewport.height {
            break;
        }
        surface.stroke_path(
            &[Vec2::new(0.0, y), Vec2::new(viewport.width, y)],
            style.paint,
            style.line_width,
        );
        i += 1;
    }
}

/// Filled square of side `size` anchored at the particle's position
pub fn draw_particle<S: Surface>(surface: &mut S, particle: &Particle) {
    surface.fill_rect(particle.pos, particle.size, particle.color.opaque());
}

/// Every pair `(i, j)` with `i <= j` closer than `max_distance`.
///
/// The range is inclusive, so each particle is also paired with itself at
/// distance 0.
pub fn connections(
    particles: &[Particle],
    max_distance: f32,
) -> impl Iterator<Item = Connection> + '_ {
    (0..particles.len()).flat_map(move |i| {
        (i..particles.len()).filter_map(move |j| {
            let d = distance(particles[i].pos, particles[j].pos);
            (d < max_distance).then(|| Connection {
                from: i,
                to: j,
                distance: d,
                closeness: 1.0 - d / max_distance,
            })
        })
    })
}

/// Right-angle path from `a` to `b`: along a's row first, then down b's column
pub fn trace_path(a: Vec2, b: Vec2) -> [Vec2; 3] {
    [a, Vec2::new(b.x, a.y), b]
}

/// Stroke a circuit trace for each connection, faded by distance
pub fn draw_connections<S: Surface>(surface: &mut S, particles: &[Particle], style: &TraceStyle) {
    for c in connections(particles, style.max_distance) {
        let path = trace_path(particles[c.from].pos, particles[c.to].pos);
        let paint = style.color.with_alpha(style.max_alpha * c.closeness);
        surface.stroke_path(&path, paint, style.line_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CommandBuffer, DrawCommand};

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 2.0)
    }

    fn cross_pairs(particles: &[Particle]) -> Vec<Connection> {
        connections(particles, CONNECTION_DISTANCE)
            .filter(|c| !c.is_self_pair())
            .collect()
    }

    #[test]
    fn test_no_connection_at_threshold() {
        let ps = [at(0.0, 0.0), at(150.0, 0.0)];
        assert!(cross_pairs(&ps).is_empty());
    }

    #[test]
    fn test_connection_just_inside_threshold() {
        let ps = [at(10.0, 10.0), at(159.0, 10.0)];
        let pairs = cross_pairs(&ps);
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].from, pairs[0].to), (0, 1));

        let mut buf = CommandBuffer::new();
        draw_connections(&mut buf, &ps, &TraceStyle::default());
        let cross: Vec<_> = buf
            .strokes()
            .filter(|c| match c {
                DrawCommand::Stroke { points, .. } => points[0] != points[2],
                _ => false,
            })
            .collect();
        assert_eq!(cross.len(), 1);
        assert_eq!(cross[0].segment_count(), 2);
        if let DrawCommand::Stroke { paint, .. } = cross[0] {
            assert!((paint.alpha - 0.5 * (1.0 / 150.0)).abs() < 1e-6);
            assert_eq!(paint.color, Rgb::ACCENT);
        }
    }

    #[test]
    fn test_self_pairs_included() {
        let ps = [at(0.0, 0.0), at(500.0, 500.0), at(900.0, 20.0)];
        let all: Vec<_> = connections(&ps, CONNECTION_DISTANCE).collect();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|c| c.is_self_pair() && c.closeness == 1.0));
    }

    #[test]
    fn test_pairs_ordered_i_le_j() {
        let ps = [at(0.0, 0.0), at(10.0, 0.0), at(20.0, 0.0)];
        let pairs: Vec<_> = connections(&ps, CONNECTION_DISTANCE)
            .map(|c| (c.from, c.to))
            .collect();
        assert_eq!(pairs, vec![(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_trace_is_right_angle() {
        let path = trace_path(Vec2::new(10.0, 20.0), Vec2::new(40.0, 80.0));
        assert_eq!(path, [Vec2::new(10.0, 20.0), Vec2::new(40.0, 20.0), Vec2::new(40.0, 80.0)]);
    }

    #[test]
    fn test_grid_line_counts() {
        let mut buf = CommandBuffer::new();
        draw_grid(&mut buf, Viewport::new(200.0, 120.0), &GridStyle::default());
        // x = 0, 50, 100, 150, 200 and y = 0, 50, 100
        assert_eq!(buf.strokes().count(), 5 + 3);
        match &buf.commands[4] {
            DrawCommand::Stroke { points, paint, line_width } => {
                assert_eq!(points, &vec![Vec2::new(200.0, 0.0), Vec2::new(200.0, 120.0)]);
                assert_eq!(paint.css(), "rgba(100, 255, 218, 0.03)");
                assert_eq!(*line_width, 1.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_grid_ignores_bad_spacing() {
        let mut buf = CommandBuffer::new();
        let style = GridStyle {
            spacing: 0.0,
            ..Default::default()
        };
        draw_grid(&mut buf, Viewport::new(200.0, 120.0), &style);
        assert!(buf.commands.is_empty());
    }

    #[test]
    fn test_draw_particle_square() {
        let mut buf = CommandBuffer::new();
        draw_particle(&mut buf, &Particle::new(Vec2::new(3.0, 4.0), Vec2::ZERO, 2.5));
        assert_eq!(
            buf.commands,
            vec![DrawCommand::Fill {
                origin: Vec2::new(3.0, 4.0),
                size: 2.5,
                paint: Rgb::ACCENT.opaque(),
            }]
        );
    }
}
