pub mod gate_adapter;
