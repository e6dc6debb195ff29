use fixed::types::I32F32;

/// Q32.32 fixed-point: used for `Factory::crafting_speed`, so that
/// `ceil(energy / speed)` is bit-for-bit reproducible across platforms.
pub type Speed = I32F32;

/// Ticks are the atomic unit of simulation time.
pub type Ticks = u64;

/// Convert an f64 (as read from JSON) to a `Speed`. Use only at load time,
/// never inside the simulation loop.
#[inline]
pub fn speed_from_f64(v: f64) -> Speed {
    Speed::from_num(v)
}

/// `ceil(energy / speed)`, with a minimum of one tick.
///
/// A recipe with `energy == 0` still takes one tick to complete; this is
/// the explicit edge-case choice called for when the catalog yields a
/// computed duration of zero.
pub fn ticks_for_energy(energy: u64, speed: Speed) -> Ticks {
    if energy == 0 {
        return 1;
    }
    let energy = Speed::from_num(energy);
    let quotient = energy / speed;
    let whole = quotient.to_num::<u64>();
    let ticks = if Speed::from_num(whole) < quotient {
        whole + 1
    } else {
        whole
    };
    ticks.max(1)
}
