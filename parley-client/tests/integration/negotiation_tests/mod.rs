mod test_caller_round;
