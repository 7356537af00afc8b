//! Controller notification capability.
//!
//! A pedestrian may be driven by an external controller (player input, AI)
//! that wants to know when its character starts or stops driving a car.

use hecs::Entity;

/// Observer for controller-relevant state changes.
pub trait ControllerHooks {
    fn on_start_car_drive(&mut self, _ped: Entity) {}
    fn on_stop_car_drive(&mut self, _ped: Entity) {}
}

/// No controller attached.
#[derive(Debug, Default)]
pub struct NullHooks;

impl ControllerHooks for NullHooks {}
