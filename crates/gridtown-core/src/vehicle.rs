//! Vehicles: doors, seats and the passenger registry.
//!
//! A seat holds at most one pedestrian. Registration is the entering
//! actor's responsibility; unregistration is idempotent so double-exit is a
//! no-op. Door and seat anchors are vehicle-local points used to place a
//! pedestrian during entry/exit choreography.

use hecs::Entity;

use gridtown_logic::math::{Vec2, Vec3};

use crate::physics::CarBody;

/// Vehicle body classes; the class picks the bike vs. car animation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleClass {
    Sedan,
    Bus,
    Truck,
    Motorcycle,
}

impl VehicleClass {
    pub fn is_bike(self) -> bool {
        self == Self::Motorcycle
    }
}

/// Seat identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarSeat {
    Driver,
    Passenger,
    PassengerExtra,
}

#[derive(Debug, Clone)]
struct Door {
    local_pos: Vec2,
    animated: bool,
    opened: bool,
}

#[derive(Debug, Clone)]
struct Seat {
    seat: CarSeat,
    local_pos: Vec2,
    door_index: Option<usize>,
}

/// A car, bus, truck or bike in the world.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub class: VehicleClass,
    pub body: CarBody,
    hard_top: bool,
    wrecked: bool,
    doors: Vec<Door>,
    seats: Vec<Seat>,
    passengers: Vec<(Entity, CarSeat)>,
}

impl Vehicle {
    /// Hard-top two-door car: driver seat behind the left door, passenger
    /// seats behind the right.
    pub fn sedan(position: Vec3, heading: gridtown_logic::math::Angle) -> Self {
        Self {
            class: VehicleClass::Sedan,
            body: CarBody::new(position, heading),
            hard_top: true,
            wrecked: false,
            doors: vec![
                Door {
                    local_pos: Vec2::new(0.4, -0.8),
                    animated: true,
                    opened: false,
                },
                Door {
                    local_pos: Vec2::new(0.4, 0.8),
                    animated: true,
                    opened: false,
                },
            ],
            seats: vec![
                Seat {
                    seat: CarSeat::Driver,
                    local_pos: Vec2::new(0.4, -0.3),
                    door_index: Some(0),
                },
                Seat {
                    seat: CarSeat::Passenger,
                    local_pos: Vec2::new(0.4, 0.3),
                    door_index: Some(1),
                },
                Seat {
                    seat: CarSeat::PassengerExtra,
                    local_pos: Vec2::new(-0.4, 0.3),
                    door_index: Some(1),
                },
            ],
            passengers: Vec::new(),
        }
    }

    /// Open-top variant of [`Vehicle::sedan`].
    pub fn convertible(position: Vec3, heading: gridtown_logic::math::Angle) -> Self {
        let mut car = Self::sedan(position, heading);
        car.hard_top = false;
        car
    }

    /// Single-seat bike: no doors, no roof.
    pub fn motorcycle(position: Vec3, heading: gridtown_logic::math::Angle) -> Self {
        Self {
            class: VehicleClass::Motorcycle,
            body: CarBody::new(position, heading),
            hard_top: false,
            wrecked: false,
            doors: Vec::new(),
            seats: vec![Seat {
                seat: CarSeat::Driver,
                local_pos: Vec2::new(0.0, 0.0),
                door_index: None,
            }],
            passengers: Vec::new(),
        }
    }

    pub fn has_hard_top(&self) -> bool {
        self.hard_top
    }

    pub fn is_wrecked(&self) -> bool {
        self.wrecked
    }

    pub fn set_wrecked(&mut self) {
        self.wrecked = true;
    }

    /// Door serving the given seat, if the vehicle has one.
    pub fn door_index_for_seat(&self, seat: CarSeat) -> Option<usize> {
        self.seats
            .iter()
            .find(|s| s.seat == seat)
            .and_then(|s| s.door_index)
    }

    pub fn has_door_animation(&self, door: usize) -> bool {
        self.doors.get(door).map(|d| d.animated).unwrap_or(false)
    }

    pub fn is_door_opened(&self, door: usize) -> bool {
        self.doors.get(door).map(|d| d.opened).unwrap_or(false)
    }

    pub fn open_door(&mut self, door: usize) {
        if let Some(d) = self.doors.get_mut(door) {
            d.opened = true;
        }
    }

    pub fn close_door(&mut self, door: usize) {
        if let Some(d) = self.doors.get_mut(door) {
            d.opened = false;
        }
    }

    /// Vehicle-local anchor of a door. Falls back to the origin for
    /// doorless vehicles.
    pub fn door_pos_local(&self, door: usize) -> Vec2 {
        self.doors.get(door).map(|d| d.local_pos).unwrap_or(Vec2::ZERO)
    }

    /// Vehicle-local anchor of a seat.
    pub fn seat_pos_local(&self, seat: CarSeat) -> Vec2 {
        self.seats
            .iter()
            .find(|s| s.seat == seat)
            .map(|s| s.local_pos)
            .unwrap_or(Vec2::ZERO)
    }

    /// World-space point for a vehicle-local anchor.
    pub fn world_point(&self, local: Vec2) -> Vec3 {
        let rotated = self.body.heading.rotate(local);
        Vec3::new(
            self.body.position.x + rotated.x,
            self.body.position.y,
            self.body.position.z + rotated.y,
        )
    }

    /// Claim a seat. The seat must be free; the entering actor evicts any
    /// prior occupant before claiming.
    pub fn register_passenger(&mut self, ped: Entity, seat: CarSeat) {
        debug_assert!(
            self.first_passenger(seat).is_none(),
            "seat already occupied"
        );
        self.passengers.push((ped, seat));
    }

    /// Release a pedestrian's seat. A no-op when not registered.
    pub fn unregister_passenger(&mut self, ped: Entity) {
        self.passengers.retain(|(p, _)| *p != ped);
    }

    /// Current occupant of a seat, if any.
    pub fn first_passenger(&self, seat: CarSeat) -> Option<Entity> {
        self.passengers
            .iter()
            .find(|(_, s)| *s == seat)
            .map(|(p, _)| *p)
    }

    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }
}
