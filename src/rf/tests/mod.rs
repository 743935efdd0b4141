mod accumulator;
