mod test_call_fan_out;
mod test_departed_target_dropped;
