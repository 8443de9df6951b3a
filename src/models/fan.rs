use egui::Pos2;

/// Fan order: centre, then the four corners, closing back on the first corner.
pub const FAN_INDICES: [u16; 6] = [0, 1, 2, 3, 4, 1];

/// Five-vertex triangle fan over a bitmap.
///
/// Vertex 0 is the hub; moving it stretches the four triangles that meet
/// there while the corners and all texture coordinates stay put.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleFan {
    verts: [Pos2; 5],
    texs: [Pos2; 5],
}

impl TriangleFan {
    pub fn new(width: f32, height: f32) -> Self {
        let corners = [
            Pos2::new(width / 2.0, height / 2.0),
            Pos2::new(0.0, 0.0),
            Pos2::new(width, 0.0),
            Pos2::new(width, height),
            Pos2::new(0.0, height),
        ];
        Self {
            verts: corners,
            texs: corners,
        }
    }

    pub fn verts(&self) -> &[Pos2; 5] {
        &self.verts
    }

    /// Texture coordinates in bitmap pixels.
    pub fn texs(&self) -> &[Pos2; 5] {
        &self.texs
    }

    pub fn center(&self) -> Pos2 {
        self.verts[0]
    }

    pub fn move_center(&mut self, pos: Pos2) {
        self.verts[0] = pos;
    }

    /// Expand the fan into a triangle list of vertex indices.
    pub fn triangles(&self) -> Vec<[u16; 3]> {
        let hub = FAN_INDICES[0];
        FAN_INDICES[1..]
            .windows(2)
            .map(|w| [hub, w[0], w[1]])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let fan = TriangleFan::new(100.0, 50.0);
        assert_eq!(fan.center(), Pos2::new(50.0, 25.0));
        assert_eq!(fan.verts(), fan.texs());
        assert_eq!(fan.verts()[3], Pos2::new(100.0, 50.0));
    }

    #[test]
    fn test_fan_expands_to_four_triangles() {
        let fan = TriangleFan::new(10.0, 10.0);
        assert_eq!(
            fan.triangles(),
            vec![[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 1]]
        );
    }

    #[test]
    fn test_move_center_keeps_texture() {
        let mut fan = TriangleFan::new(10.0, 10.0);
        let texs = *fan.texs();
        fan.move_center(Pos2::new(1.0, 9.0));
        assert_eq!(fan.center(), Pos2::new(1.0, 9.0));
        assert_eq!(fan.texs(), &texs);
        assert_eq!(fan.verts()[1..], texs[1..]);
    }
}
