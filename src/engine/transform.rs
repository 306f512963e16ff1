use crate::{
    engine::types::TranslatedWall,
    world::{camera::Camera, geometry::Wall},
};

/// World → view space for a single wall. Face ids are carried verbatim.
#[inline]
pub fn translate_wall(wall: &Wall, cam: &Camera) -> TranslatedWall {
    TranslatedWall {
        p0: cam.to_view(wall.p0),
        p1: cam.to_view(wall.p1),
        front: wall.front,
        back: wall.back,
    }
}

/// Translate every wall into `out`, one record per input wall.
///
/// `out` is cleared first; once its capacity covers the wall count this
/// never allocates.
pub fn translate_walls(walls: &[Wall], cam: &Camera, out: &mut Vec<TranslatedWall>) {
    out.clear();
    out.extend(walls.iter().map(|w| translate_wall(w, cam)));
}
