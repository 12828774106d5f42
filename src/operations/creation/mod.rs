mod welding_stubs;

pub use welding_stubs::WeldingStubs;
