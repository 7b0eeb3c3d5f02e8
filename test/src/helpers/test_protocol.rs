use patchwork_shared::{
    array_of, boolean_with, map_of, number, string_with, Protocol, Schema, TypeId,
};

pub const POSITION: TypeId = 1;
pub const PLAYER: TypeId = 2;

/// Builder for creating test protocols
pub struct TestProtocol;

impl TestProtocol {
    /// A protocol with no schemas
    pub fn minimal() -> Protocol {
        Protocol::builder().build()
    }

    /// `{x, y}`
    pub fn position() -> Schema {
        Schema::new().with("x", number()).with("y", number())
    }

    /// Collates to:
    /// ```text
    /// alive(1) home(2){ x(3) y(4) } inventory(5)[ {count(6) item(7)} ]
    /// name(8) stats(9){ number }
    /// ```
    pub fn player() -> Schema {
        Schema::new()
            .with("name", string_with("anon"))
            .with("alive", boolean_with(true))
            .with("stats", map_of(number()))
            .with(
                "inventory",
                array_of(
                    Schema::new()
                        .with("item", string_with("none"))
                        .with("count", number()),
                ),
            )
            .with("home", TestProtocol::position())
    }

    /// Position and Player, unlocked
    pub fn game() -> Protocol {
        let mut protocol = Protocol::builder();
        protocol
            .add_schema(POSITION, TestProtocol::position())
            .add_schema(PLAYER, TestProtocol::player());
        protocol.build()
    }
}
