pub const USAGE: &str = r#"Usage: i2c-ctl [options] [device] {get|set|write|read} <args...> ...
This tool can send or receive register bytes and raw data to or from a slave
I2C device (SMBus).

Options:
  --device,-d                    I2C device path (defaults to: "/dev/i2c").
                                 This is the default option, and may also be
                                 given directly without any option flag.

  -- <device>, --<device>        I2C device path, taken as given.

  --slave-address,--address,-a   I2C slave address.

  @<address>                     I2C slave address, as given in <address>.

  --format,-f                    Print get-result with given printf-format.
                                 Defaults to "0x%02x\n".

  --verbose,-v                   Print info messages.

  --help,-h                      Show this help.


Actions:
  get <register>
  set <register> <value>
  write <data...>                Send all remaining arguments, joined by
                                 spaces, with C escapes decoded (\n, \x41,
                                 \101, \u0041, \U00000041).
  read [count]                   Read count bytes (defaults to 1) and print
                                 them as text.


Examples:
  > i2c-ctl /dev/i2c-1 @0x68 set 0x44 0x3a
  > i2c-ctl /dev/i2c-1 @0x68 get 0x44
  0x3a
  > i2c-ctl /dev/i2c-1 @104 get 0x44
  0x3a
  > i2c-ctl -d /dev/i2c-1 -a $'\x68' get 0x44
  0x3a
  > i2c-ctl -f $'%d\n' /dev/i2c-1 @0x68 get 0x44
  58
  > i2c-ctl /dev/i2c-1 @0x50 write Hi '\x21'
  > i2c-ctl /dev/i2c-1 @0x50 read 4
  Hi !


Note: Values or addresses can be passed as hexadecimal (0x##), integer (#),
or directly as a raw char (may not be printable).
"#;
