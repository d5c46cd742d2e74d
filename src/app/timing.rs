//! Fixed tick rate for the movement integrator.
//!
//! Movement constants are per tick, so the tick rate decides how fast the
//! visitor walks in real time.
use bevy::prelude::*;
use gallery::settings::Settings;

#[allow(clippy::needless_pass_by_value)]
pub fn sync_tick_rate(settings: Res<Settings>, mut fixed: ResMut<Time<Fixed>>, mut last: Local<Option<f64>>) {
    let hz = settings.movement.effective_tick_rate();
    if *last == Some(hz) {
        return;
    }
    if hz != settings.movement.tick_rate_hz {
        warn!("tick_rate_hz {} is unusable, running at {hz} Hz", settings.movement.tick_rate_hz);
    }
    fixed.set_timestep_hz(hz);
    info!("movement tick rate: {hz} Hz");
    *last = Some(hz);
}
