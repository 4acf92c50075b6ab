//! rapier2d physics world with stable body ids and a debug-draw bridge.
//!
//! The [`PhysicsWorld`] owns every rapier set and hands out [`BodyId`] /
//! [`JointId`] values that stay stable for the life of the world. Iteration
//! that is visible to callers (collision pairs, body states, debug drawing)
//! goes through the id maps, never through rapier's internal arena order.
//!
//! # Determinism
//!
//! rapier2d is compiled with `enhanced-determinism`. Combined with a fixed
//! timestep and id-ordered iteration, two worlds built the same way step to
//! identical states on the same platform.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use rapier2d::parry::shape::{Shape, TypedShape};
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};
use testbed_camera::point::Point2;

use crate::render::draw::{Color, DebugDraw, DrawFlags, Pose};
use crate::PhysicsError;

/// Marker size of solver contact points, in pixels.
pub const CONTACT_POINT_PX: f64 = 5.0;

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

/// Stable identifier of a body added with [`PhysicsWorld::add_body`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// Stable identifier of a joint added with [`PhysicsWorld::add_joint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JointId(pub u64);

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "j{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Body descriptors
// ---------------------------------------------------------------------------

/// How rapier treats a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Fully simulated.
    Dynamic,
    /// Moved by velocity only, unaffected by forces.
    Kinematic,
    /// Immovable.
    Fixed,
}

/// Collider geometry, in the body's local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Box with half-extents.
    Box {
        /// Half-width along the local x axis.
        half_width: f64,
        /// Half-height along the local y axis.
        half_height: f64,
    },
    /// Circle centred on the body origin.
    Circle {
        /// Radius of the circle.
        radius: f64,
    },
    /// Convex hull of the given points (at least three, not collinear).
    Polygon {
        /// Hull input points.
        points: Vec<Point2>,
    },
    /// Single segment.
    Segment {
        /// First end.
        a: Point2,
        /// Second end.
        b: Point2,
    },
    /// Open chain of segments through consecutive points.
    Polyline {
        /// Chain vertices, at least two.
        points: Vec<Point2>,
    },
}

/// Everything needed to create a body and its single collider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    /// Body type.
    pub kind: BodyKind,
    /// Collider geometry.
    pub shape: ColliderShape,
    /// Initial world position of the body origin.
    pub position: Point2,
    /// Initial rotation in radians.
    pub angle: f64,
    /// Initial linear velocity.
    pub linvel: Point2,
    /// Initial angular velocity.
    pub angvel: f64,
    /// Collider density.
    pub density: f64,
    /// Coulomb friction coefficient.
    pub friction: f64,
    /// Coefficient of restitution. 0.0 = no bounce, 1.0 = perfect bounce.
    pub restitution: f64,
    /// Sensors report collisions but do not respond physically.
    pub is_sensor: bool,
}

impl BodyDesc {
    /// A body of `kind` at `position` with default material.
    pub fn new(kind: BodyKind, shape: ColliderShape, position: Point2) -> Self {
        Self {
            kind,
            shape,
            position,
            angle: 0.0,
            linvel: Point2::ZERO,
            angvel: 0.0,
            density: 1.0,
            friction: 0.6,
            restitution: 0.0,
            is_sensor: false,
        }
    }

    /// Dynamic body.
    pub fn dynamic(shape: ColliderShape, position: Point2) -> Self {
        Self::new(BodyKind::Dynamic, shape, position)
    }

    /// Kinematic body.
    pub fn kinematic(shape: ColliderShape, position: Point2) -> Self {
        Self::new(BodyKind::Kinematic, shape, position)
    }

    /// Fixed (static) body.
    pub fn fixed(shape: ColliderShape, position: Point2) -> Self {
        Self::new(BodyKind::Fixed, shape, position)
    }

    /// Set the initial rotation.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Set the initial linear velocity.
    pub fn with_linvel(mut self, linvel: Point2) -> Self {
        self.linvel = linvel;
        self
    }

    /// Set the restitution.
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }
}

// ---------------------------------------------------------------------------
// Joint descriptors
// ---------------------------------------------------------------------------

/// Joint type and its parameters. Anchors are in each body's local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JointKind {
    /// Hinge around a shared point.
    Revolute {
        /// Anchor on body A.
        anchor_a: Point2,
        /// Anchor on body B.
        anchor_b: Point2,
        /// Optional `[min, max]` angle limits in radians.
        limits: Option<[f64; 2]>,
        /// Optional `(target_velocity, factor)` velocity motor.
        motor: Option<(f64, f64)>,
    },
    /// Slider along `axis` (in body A's frame).
    Prismatic {
        /// Slide direction; normalised on creation.
        axis: Point2,
        /// Anchor on body A.
        anchor_a: Point2,
        /// Anchor on body B.
        anchor_b: Point2,
        /// Optional `[min, max]` translation limits.
        limits: Option<[f64; 2]>,
    },
    /// Weld: no relative motion.
    Fixed {
        /// Anchor on body A.
        anchor_a: Point2,
        /// Anchor on body B.
        anchor_b: Point2,
    },
    /// Distance ceiling between the anchors.
    Rope {
        /// Anchor on body A.
        anchor_a: Point2,
        /// Anchor on body B.
        anchor_b: Point2,
        /// Maximum anchor distance.
        max_distance: f64,
    },
}

/// A joint between two existing bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointDesc {
    /// First body.
    pub body_a: BodyId,
    /// Second body.
    pub body_b: BodyId,
    /// Joint type.
    pub kind: JointKind,
}

// ---------------------------------------------------------------------------
// Read-back types
// ---------------------------------------------------------------------------

/// Snapshot of one body after a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    /// Body id.
    pub id: BodyId,
    /// Body type.
    pub kind: BodyKind,
    /// World position of the body origin.
    pub position: Point2,
    /// Rotation in radians.
    pub angle: f64,
    /// Linear velocity.
    pub linvel: Point2,
    /// Whether the body is asleep.
    pub sleeping: bool,
}

/// A collision between two bodies that started during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollisionPair {
    /// Lower body id of the pair.
    pub body_a: BodyId,
    /// Higher body id of the pair.
    pub body_b: BodyId,
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Owns the rapier2d simulation and maps rapier handles to stable ids.
pub struct PhysicsWorld {
    pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    integration_params: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    next_body: u64,
    next_joint: u64,
    bodies: BTreeMap<BodyId, RigidBodyHandle>,
    joints: BTreeMap<JointId, ImpulseJointHandle>,
    collider_to_body: HashMap<ColliderHandle, BodyId>,
}

impl PhysicsWorld {
    /// Create an empty world with the given gravity vector.
    pub fn new(gravity: Point2) -> Self {
        Self {
            pipeline: PhysicsPipeline::new(),
            gravity: vector![gravity.x as Real, gravity.y as Real],
            integration_params: IntegrationParameters::default(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            next_body: 0,
            next_joint: 0,
            bodies: BTreeMap::new(),
            joints: BTreeMap::new(),
            collider_to_body: HashMap::new(),
        }
    }

    /// Create an empty world with zero gravity.
    pub fn new_zero_gravity() -> Self {
        Self::new(Point2::ZERO)
    }

    /// Gravity vector.
    pub fn gravity(&self) -> Point2 {
        Point2::new(f64::from(self.gravity.x), f64::from(self.gravity.y))
    }

    // -- bodies ---------------------------------------------------------------

    /// Add a body with one collider.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError`] when the shape is degenerate: a non-positive
    /// size, too few vertices, or a polygon whose hull has no area.
    pub fn add_body(&mut self, desc: &BodyDesc) -> Result<BodyId, PhysicsError> {
        let shape = build_shape(&desc.shape)?;

        let builder = match desc.kind {
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
            BodyKind::Kinematic => RigidBodyBuilder::kinematic_velocity_based(),
            BodyKind::Fixed => RigidBodyBuilder::fixed(),
        };
        let rb = builder
            .translation(to_vector(desc.position))
            .rotation(desc.angle as Real)
            .linvel(to_vector(desc.linvel))
            .angvel(desc.angvel as Real)
            .build();
        let body_handle = self.rigid_body_set.insert(rb);

        let collider = ColliderBuilder::new(shape)
            .density(desc.density as Real)
            .friction(desc.friction as Real)
            .restitution(desc.restitution as Real)
            .sensor(desc.is_sensor)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let collider_handle =
            self.collider_set
                .insert_with_parent(collider, body_handle, &mut self.rigid_body_set);

        let id = BodyId(self.next_body);
        self.next_body += 1;
        self.bodies.insert(id, body_handle);
        self.collider_to_body.insert(collider_handle, id);
        tracing::debug!(body = %id, kind = ?desc.kind, "body added");
        Ok(id)
    }

    /// Remove a body, its collider and every joint attached to it.
    ///
    /// Returns `false` if the id is unknown.
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        let Some(handle) = self.bodies.remove(&id) else {
            return false;
        };
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
        self.collider_to_body.retain(|_, body| *body != id);
        // rapier drops the attached joints; forget their ids too.
        let joint_set = &self.impulse_joint_set;
        self.joints.retain(|_, handle| joint_set.get(*handle).is_some());
        tracing::debug!(body = %id, "body removed");
        true
    }

    /// Overwrite a body's linear and angular velocity.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownBody`] if the id is not in the world.
    pub fn set_body_velocity(
        &mut self,
        id: BodyId,
        linvel: Point2,
        angvel: f64,
    ) -> Result<(), PhysicsError> {
        let handle = self.handle(id)?;
        let rb = self
            .rigid_body_set
            .get_mut(handle)
            .ok_or(PhysicsError::UnknownBody(id))?;
        rb.set_linvel(to_vector(linvel), true);
        rb.set_angvel(angvel as Real, true);
        Ok(())
    }

    /// World pose of a body's origin.
    pub fn body_pose(&self, id: BodyId) -> Option<Pose> {
        let rb = self.rigid_body_set.get(*self.bodies.get(&id)?)?;
        Some(iso_to_pose(rb.position()))
    }

    /// Body whose collider contains the world point, for mouse picking.
    ///
    /// Movable bodies win over fixed ones, so a box resting on the ground is
    /// picked rather than the ground. Ties go to the lowest id.
    pub fn body_at_point(&self, p: Point2) -> Option<BodyId> {
        let point = point![p.x as Real, p.y as Real];
        let mut fixed_hit = None;
        for (&id, &handle) in &self.bodies {
            let Some(rb) = self.rigid_body_set.get(handle) else {
                continue;
            };
            let hit = rb.colliders().iter().any(|&ch| {
                self.collider_set
                    .get(ch)
                    .is_some_and(|c| c.shape().contains_point(c.position(), &point))
            });
            if !hit {
                continue;
            }
            if !rb.is_fixed() {
                return Some(id);
            }
            fixed_hit = fixed_hit.or(Some(id));
        }
        fixed_hit
    }

    /// Read every body's state, in id order.
    pub fn body_states(&self) -> Vec<BodyState> {
        self.bodies
            .iter()
            .filter_map(|(&id, &handle)| {
                let rb = self.rigid_body_set.get(handle)?;
                let pose = iso_to_pose(rb.position());
                Some(BodyState {
                    id,
                    kind: kind_of(rb),
                    position: pose.translation,
                    angle: pose.angle,
                    linvel: to_point2(rb.linvel()),
                    sleeping: rb.is_sleeping(),
                })
            })
            .collect()
    }

    /// Whether the id refers to a live body.
    pub fn has_body(&self, id: BodyId) -> bool {
        self.bodies.contains_key(&id)
    }

    /// Number of live bodies.
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    // -- joints ---------------------------------------------------------------

    /// Connect two bodies.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError`] if either body is unknown, both ids are the
    /// same, a prismatic axis has zero length, or a rope length is not
    /// positive.
    pub fn add_joint(&mut self, desc: &JointDesc) -> Result<JointId, PhysicsError> {
        if desc.body_a == desc.body_b {
            return Err(PhysicsError::SameBody(desc.body_a));
        }
        let h1 = self.handle(desc.body_a)?;
        let h2 = self.handle(desc.body_b)?;

        let data: GenericJoint = match &desc.kind {
            JointKind::Revolute {
                anchor_a,
                anchor_b,
                limits,
                motor,
            } => {
                let mut b = RevoluteJointBuilder::new()
                    .local_anchor1(to_point(*anchor_a))
                    .local_anchor2(to_point(*anchor_b));
                if let Some([min, max]) = limits {
                    b = b.limits([*min as Real, *max as Real]);
                }
                if let Some((velocity, factor)) = motor {
                    b = b.motor_velocity(*velocity as Real, *factor as Real);
                }
                b.into()
            }
            JointKind::Prismatic {
                axis,
                anchor_a,
                anchor_b,
                limits,
            } => {
                if !axis.is_finite() || axis.length() <= f64::EPSILON {
                    return Err(PhysicsError::DegenerateAxis);
                }
                let axis = rapier2d::na::Unit::new_normalize(to_vector(*axis));
                let mut b = PrismaticJointBuilder::new(axis)
                    .local_anchor1(to_point(*anchor_a))
                    .local_anchor2(to_point(*anchor_b));
                if let Some([min, max]) = limits {
                    b = b.limits([*min as Real, *max as Real]);
                }
                b.into()
            }
            JointKind::Fixed { anchor_a, anchor_b } => FixedJointBuilder::new()
                .local_anchor1(to_point(*anchor_a))
                .local_anchor2(to_point(*anchor_b))
                .into(),
            JointKind::Rope {
                anchor_a,
                anchor_b,
                max_distance,
            } => {
                check_size("rope max_distance", *max_distance)?;
                RopeJointBuilder::new(*max_distance as Real)
                    .local_anchor1(to_point(*anchor_a))
                    .local_anchor2(to_point(*anchor_b))
                    .into()
            }
        };

        let handle = self.impulse_joint_set.insert(h1, h2, data, true);
        let id = JointId(self.next_joint);
        self.next_joint += 1;
        self.joints.insert(id, handle);
        tracing::debug!(joint = %id, body_a = %desc.body_a, body_b = %desc.body_b, "joint added");
        Ok(id)
    }

    /// Number of live joints.
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    // -- stepping -------------------------------------------------------------

    /// Step the simulation by `dt` seconds.
    ///
    /// Returns the collision pairs that started during the step, sorted by
    /// `(lower id, higher id)`.
    pub fn step(&mut self, dt: f64) -> Vec<CollisionPair> {
        self.integration_params.dt = dt as Real;

        let (collision_send, collision_recv) =
            rapier2d::crossbeam::channel::unbounded::<CollisionEvent>();
        let (force_send, _force_recv) =
            rapier2d::crossbeam::channel::unbounded::<ContactForceEvent>();
        let event_handler = ChannelEventCollector::new(collision_send, force_send);

        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None, // query pipeline (unused)
            &(),  // physics hooks
            &event_handler,
        );

        let mut collisions = Vec::new();
        while let Ok(event) = collision_recv.try_recv() {
            if let CollisionEvent::Started(h1, h2, _flags) = event {
                let a = self.collider_to_body.get(&h1).copied();
                let b = self.collider_to_body.get(&h2).copied();
                if let (Some(a), Some(b)) = (a, b) {
                    collisions.push(CollisionPair {
                        body_a: a.min(b),
                        body_b: a.max(b),
                    });
                }
            }
        }
        // Channel delivery order is not stable across runs.
        collisions.sort();
        collisions
    }

    // -- debug drawing ----------------------------------------------------------

    /// Emit the world through a [`DebugDraw`] sink.
    ///
    /// Bodies are visited in id order. Each collider shape is drawn in its
    /// local frame inside a push/pop of the collider's world pose, colored by
    /// body state; `selected` overrides the color of one body.
    pub fn debug_draw<D: DebugDraw + ?Sized>(
        &self,
        draw: &mut D,
        flags: &DrawFlags,
        selected: Option<BodyId>,
    ) {
        for (&id, &handle) in &self.bodies {
            let Some(rb) = self.rigid_body_set.get(handle) else {
                continue;
            };
            let color = if selected == Some(id) {
                Color::SELECTED
            } else {
                body_color(rb)
            };

            for &ch in rb.colliders() {
                let Some(collider) = self.collider_set.get(ch) else {
                    continue;
                };
                if flags.shapes {
                    draw.push_transform(iso_to_pose(collider.position()));
                    draw_shape(draw, collider.shape(), color);
                    draw.pop_transform();
                }
                if flags.aabbs {
                    let aabb = collider.compute_aabb();
                    draw.draw_aabb(to_point2(&aabb.mins.coords), to_point2(&aabb.maxs.coords), Color::AABB);
                }
            }

            if flags.center_of_mass {
                let com = rb.center_of_mass();
                draw.draw_transform(Pose::new(
                    to_point2(&com.coords),
                    f64::from(rb.rotation().angle()),
                ));
            }
            if flags.body_labels {
                let origin = to_point2(rb.translation());
                draw.draw_string_world(origin, &id.to_string(), Color::TEXT);
            }
        }

        if flags.joints {
            for handle in self.joints.values() {
                let Some(joint) = self.impulse_joint_set.get(*handle) else {
                    continue;
                };
                let (Some(rb1), Some(rb2)) = (
                    self.rigid_body_set.get(joint.body1),
                    self.rigid_body_set.get(joint.body2),
                ) else {
                    continue;
                };
                let x1 = to_point2(rb1.translation());
                let x2 = to_point2(rb2.translation());
                let p1 = to_point2(&(rb1.position() * joint.data.local_anchor1()).coords);
                let p2 = to_point2(&(rb2.position() * joint.data.local_anchor2()).coords);
                draw.draw_segment(x1, p1, Color::JOINT);
                draw.draw_segment(p1, p2, Color::JOINT);
                draw.draw_segment(x2, p2, Color::JOINT);
            }
        }

        if flags.contact_points {
            for pair in self.narrow_phase.contact_pairs() {
                if !pair.has_any_active_contact {
                    continue;
                }
                for manifold in &pair.manifolds {
                    for contact in &manifold.data.solver_contacts {
                        draw.draw_point(
                            to_point2(&contact.point.coords),
                            CONTACT_POINT_PX,
                            Color::CONTACT,
                        );
                    }
                }
            }
        }
    }

    fn handle(&self, id: BodyId) -> Result<RigidBodyHandle, PhysicsError> {
        self.bodies
            .get(&id)
            .copied()
            .ok_or(PhysicsError::UnknownBody(id))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_shape(shape: &ColliderShape) -> Result<SharedShape, PhysicsError> {
    match shape {
        ColliderShape::Box {
            half_width,
            half_height,
        } => {
            check_size("box half_width", *half_width)?;
            check_size("box half_height", *half_height)?;
            Ok(SharedShape::cuboid(*half_width as Real, *half_height as Real))
        }
        ColliderShape::Circle { radius } => {
            check_size("circle radius", *radius)?;
            Ok(SharedShape::ball(*radius as Real))
        }
        ColliderShape::Polygon { points } => {
            if points.len() < 3 {
                return Err(PhysicsError::TooFewVertices {
                    shape: "polygon",
                    min: 3,
                    got: points.len(),
                });
            }
            let pts: Vec<Point<Real>> = points.iter().map(|p| to_point(*p)).collect();
            let hull = if spans_area(points) {
                SharedShape::convex_hull(&pts)
            } else {
                None
            };
            hull.ok_or_else(|| {
                tracing::warn!(vertices = points.len(), "degenerate polygon collider rejected");
                PhysicsError::DegeneratePolygon
            })
        }
        ColliderShape::Segment { a, b } => {
            if a == b {
                return Err(PhysicsError::DegeneratePolygon);
            }
            Ok(SharedShape::segment(to_point(*a), to_point(*b)))
        }
        ColliderShape::Polyline { points } => {
            if points.len() < 2 {
                return Err(PhysicsError::TooFewVertices {
                    shape: "polyline",
                    min: 2,
                    got: points.len(),
                });
            }
            let pts = points.iter().map(|p| to_point(*p)).collect();
            Ok(SharedShape::polyline(pts, None))
        }
    }
}

/// Whether the points are not all collinear.
fn spans_area(points: &[Point2]) -> bool {
    let Some(&origin) = points.first() else {
        return false;
    };
    let Some(&far) = points
        .iter()
        .max_by(|a, b| (**a - origin).length().total_cmp(&(**b - origin).length()))
    else {
        return false;
    };
    let edge = far - origin;
    let scale = edge.length();
    if scale <= f64::EPSILON {
        return false;
    }
    points.iter().any(|&p| {
        let d = p - origin;
        (edge.x * d.y - edge.y * d.x).abs() > 1e-9 * scale * scale
    })
}

fn draw_shape<D: DebugDraw + ?Sized>(draw: &mut D, shape: &dyn Shape, color: Color) {
    match shape.as_typed_shape() {
        TypedShape::Ball(ball) => {
            draw.draw_solid_circle(
                Point2::ZERO,
                f64::from(ball.radius),
                Point2::new(1.0, 0.0),
                color,
            );
        }
        TypedShape::Cuboid(cuboid) => {
            let hx = f64::from(cuboid.half_extents.x);
            let hy = f64::from(cuboid.half_extents.y);
            let vertices = [
                Point2::new(-hx, -hy),
                Point2::new(hx, -hy),
                Point2::new(hx, hy),
                Point2::new(-hx, hy),
            ];
            draw.draw_solid_polygon(&vertices, color);
        }
        TypedShape::ConvexPolygon(poly) => {
            let vertices: Vec<Point2> = poly.points().iter().map(|p| to_point2(&p.coords)).collect();
            draw.draw_solid_polygon(&vertices, color);
        }
        TypedShape::Segment(seg) => {
            draw.draw_segment(to_point2(&seg.a.coords), to_point2(&seg.b.coords), color);
        }
        TypedShape::Polyline(polyline) => {
            for seg in polyline.segments() {
                draw.draw_segment(to_point2(&seg.a.coords), to_point2(&seg.b.coords), color);
            }
        }
        _ => tracing::trace!("collider shape has no debug drawing"),
    }
}

fn body_color(rb: &RigidBody) -> Color {
    if !rb.is_enabled() {
        Color::INACTIVE
    } else if rb.is_fixed() {
        Color::STATIC
    } else if rb.is_kinematic() {
        Color::KINEMATIC
    } else if rb.is_sleeping() {
        Color::SLEEPING
    } else {
        Color::DYNAMIC
    }
}

fn kind_of(rb: &RigidBody) -> BodyKind {
    if rb.is_fixed() {
        BodyKind::Fixed
    } else if rb.is_kinematic() {
        BodyKind::Kinematic
    } else {
        BodyKind::Dynamic
    }
}

fn check_size(field: &'static str, value: f64) -> Result<(), PhysicsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidSize { field, value })
    }
}

fn to_vector(p: Point2) -> Vector<Real> {
    vector![p.x as Real, p.y as Real]
}

fn to_point(p: Point2) -> Point<Real> {
    point![p.x as Real, p.y as Real]
}

fn to_point2(v: &Vector<Real>) -> Point2 {
    Point2::new(f64::from(v.x), f64::from(v.y))
}

fn iso_to_pose(iso: &Isometry<Real>) -> Pose {
    Pose::new(
        to_point2(&iso.translation.vector),
        f64::from(iso.rotation.angle()),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
